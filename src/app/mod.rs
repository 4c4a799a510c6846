pub mod events;
pub mod job;
pub mod proxy;
pub mod state;
pub mod tasks;

pub use events::{IngestEvent, LogLevel};
pub use job::{JobController, JobState};
pub use proxy::EventProxy;
pub use state::AppState;
pub use tasks::{cancel_job, ingest, IngestOutcome};
