//! Events crossing from the worker context to the interactive surface.

use serde::{Deserialize, Serialize};

use crate::parser::DemoInfo;

/// Severity of a user-facing log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Fatal,
}

/// Events sent over the bridge to the interactive surface.
///
/// Delivery preserves emission order; the surface drains them on its own
/// loop and feeds each one through [`crate::app::state::AppState::apply_event`]
/// before rendering.
#[derive(Debug, Clone)]
pub enum IngestEvent {
    /// Overall batch progress in `[0.0, 1.0]`. Values may be coalesced; only
    /// the latest one matters.
    Progress(f32),
    /// A leveled log line for the user-facing log view.
    Log(LogLevel, String),
    /// One demo finished parsing and belongs in the collection. Emitted per
    /// item, in the order the parser produced its results.
    DemoAdded(DemoInfo),
    /// Enable/disable bracketing for the interactive surface. `false` is sent
    /// before the worker starts, `true` when it finishes for any reason.
    UiEnabled(bool),
}
