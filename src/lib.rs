//! Job-execution core for a desktop demo manager.
//!
//! The crate takes a batch of user-selected paths, classifies and deduplicates
//! them, and hands the surviving demo files to an external batch parser on a
//! dedicated worker context. Progress, leveled log lines, per-demo "added"
//! notifications and UI enable/disable bracketing all travel back to the
//! interactive surface over a single fire-and-forget event channel.
//!
//! The interactive surface itself (windows, menus, config files) is not part
//! of this crate; it consumes [`app::events::IngestEvent`]s and provides the
//! inputs to [`app::tasks::ingest`].

pub mod app;
pub mod config;
pub mod core;
pub mod parser;
