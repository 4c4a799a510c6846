//! Interface to the external batch demo parser.
//!
//! The parser is an opaque collaborator: it may be slow, it may block, and it
//! may parallelize internally up to `max_thread_count`. This crate only
//! defines the calling contract; see [`crate::app::tasks`] for the worker
//! that drives it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use thiserror::Error;

use crate::app::events::LogLevel;

/// Where the parser writes any files it produces for a demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputPolicy {
    /// Output lands in the same directory as each source demo.
    BesideSource,
    /// Output lands in one fixed target directory.
    Fixed(PathBuf),
}

/// An immutable batch of work, consumed by exactly one worker execution.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// Absolute, deduplicated demo file paths.
    pub file_paths: Vec<PathBuf>,
    pub output_policy: OutputPolicy,
    /// Upper bound on the parser's internal worker threads.
    pub max_thread_count: usize,
}

/// Network protocol a demo file was recorded under, derived from its
/// extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Protocol {
    Dm68,
    Dm73,
    Dm90,
    Invalid,
}

impl Protocol {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match extension.as_deref() {
            Some("dm_68") => Protocol::Dm68,
            Some("dm_73") => Protocol::Dm73,
            Some("dm_90") => Protocol::Dm90,
            _ => Protocol::Invalid,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Protocol::Dm68 => "dm_68",
            Protocol::Dm73 => "dm_73",
            Protocol::Dm90 => "dm_90",
            Protocol::Invalid => "invalid",
        };
        write!(f, "{}", name)
    }
}

/// Metadata the parser produced for a single demo file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoInfo {
    pub file_path: PathBuf,
    pub protocol: Protocol,
}

/// Failure of a whole batch-parse call.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The cancellation flag was observed; the batch was abandoned.
    #[error("operation was cancelled")]
    Cancelled,
    /// A low-level fault aborted the batch.
    #[error("parser fault: {0}")]
    Fault(String),
}

/// The external batch parser.
///
/// `parse_batch` must be called at most once per [`BatchRequest`]. The
/// callbacks and the cancellation flag stay valid for the whole call; the
/// parser is expected to poll `cancel_flag` at its own internal boundaries
/// and return [`ParseError::Cancelled`] once it observes it.
///
/// On success the result list must contain one entry per requested file, in
/// any order the parser chooses; the caller treats any other cardinality as
/// a whole-batch failure.
pub trait BatchParser: Send + Sync + 'static {
    fn parse_batch(
        &self,
        request: &BatchRequest,
        on_progress: &(dyn Fn(f32) + Send + Sync),
        on_log: &(dyn Fn(LogLevel, &str) + Send + Sync),
        cancel_flag: &Arc<AtomicBool>,
    ) -> Result<Vec<DemoInfo>, ParseError>;
}
