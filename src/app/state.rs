//! Defines the central, mutable state of the ingestion core.

use crate::config::IngestConfig;
use crate::core::DemoCollection;

use super::events::IngestEvent;
use super::job::JobController;

/// State shared between the interactive surface and the ingest entry points.
///
/// Wrapped in an `Arc<Mutex<...>>` by the embedding application. The worker
/// context never locks it; results arrive through the event bridge and are
/// folded in by [`apply_event`](Self::apply_event) on the interactive side.
pub struct AppState {
    /// Read-only configuration supplied by the embedding application.
    pub config: IngestConfig,
    /// All demos ingested during this session.
    pub demos: DemoCollection,
    /// The single background job slot.
    pub job: JobController,
    /// `false` while a batch job is running and the surface should reject
    /// input.
    pub ui_enabled: bool,
    /// Latest batch progress in `[0.0, 1.0]`.
    pub progress: f32,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: IngestConfig::default(),
            demos: DemoCollection::default(),
            job: JobController::default(),
            ui_enabled: true,
            progress: 0.0,
        }
    }
}

impl AppState {
    pub fn with_config(config: IngestConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Folds one bridge event into state. Must be called from the interactive
    /// context's drain loop; this is the only place demos are appended.
    ///
    /// Log lines carry no state and are left to the surface to display.
    pub fn apply_event(&mut self, event: &IngestEvent) {
        match event {
            IngestEvent::Progress(fraction) => self.progress = *fraction,
            IngestEvent::DemoAdded(info) => {
                self.demos.add(info.clone());
            }
            IngestEvent::UiEnabled(enabled) => self.ui_enabled = *enabled,
            IngestEvent::Log(..) => {}
        }
    }
}
