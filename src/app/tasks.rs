//! The ingestion pipeline and the background batch-parse worker.
//!
//! [`ingest`] runs on the interactive context and returns as soon as the
//! worker is spawned; completion is observed only through the event bridge.
//! [`run_batch_job`] is the worker body, executed on a blocking task.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use super::events::{IngestEvent, LogLevel};
use super::proxy::EventProxy;
use super::state::AppState;

use crate::core::{filter_new, FolderExpander, PathClassifier, RecursionChoice};
use crate::parser::{BatchParser, BatchRequest, ParseError};

/// What `ingest` did with the submitted inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The user cancelled the recursive-scan prompt; nothing was touched.
    Cancelled,
    /// Nothing new survived classification and deduplication; no job was
    /// started and the surface was never disabled.
    NothingToDo,
    /// A batch job with this many demos was handed to the worker.
    Started(usize),
}

/// Ingests a batch of raw user inputs.
///
/// Classifies the inputs, expands folders (asking `prompt` for the recursion
/// decision unless the config says to skip it), deduplicates against the
/// known demos and hands the survivors to the parser on a fresh worker.
///
/// The call blocks only for the recursion prompt and for joining a previous
/// worker that may still be tearing down; it never waits for its own job to
/// complete.
pub async fn ingest<P, F>(
    raw_inputs: Vec<PathBuf>,
    parser: Arc<dyn BatchParser>,
    prompt: F,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) -> IngestOutcome
where
    P: EventProxy,
    F: FnOnce() -> RecursionChoice,
{
    let (classifier, skip_dialog, recursive_default, output_policy, max_thread_count) = {
        let state = state.lock().unwrap();
        (
            PathClassifier::new(&state.config.demo_extensions),
            state.config.skip_recursive_scan_dialog,
            state.config.scan_folders_recursively,
            state.config.output_policy(),
            state.config.max_thread_count,
        )
    };

    let (mut file_paths, folder_paths) = classifier.partition(&raw_inputs);

    if !folder_paths.is_empty() {
        let recursive = if skip_dialog {
            recursive_default
        } else {
            match prompt() {
                RecursionChoice::Recursive => true,
                RecursionChoice::TopLevelOnly => false,
                RecursionChoice::Cancel => {
                    // Aborts the whole call, plain files included.
                    tracing::info!("recursive-scan prompt cancelled, dropping batch");
                    return IngestOutcome::Cancelled;
                }
            }
        };

        let expander = FolderExpander::new(&classifier);
        file_paths.extend(expander.expand(&folder_paths, recursive));
    }

    let batch_paths = {
        let state = state.lock().unwrap();
        filter_new(file_paths, &state.demos)
    };
    if batch_paths.is_empty() {
        return IngestOutcome::NothingToDo;
    }

    // Join the previous worker before starting a new one so two workers are
    // never alive simultaneously. Brief: the prior job is either done or
    // tearing down after cancellation.
    let previous = state.lock().unwrap().job.take_handle();
    if let Some(handle) = previous {
        if let Err(e) = handle.await {
            tracing::error!("previous worker terminated abnormally: {}", e);
        }
    }

    let request = BatchRequest {
        file_paths: batch_paths,
        output_policy,
        max_thread_count,
    };
    let submitted = request.file_paths.len();
    tracing::info!("starting batch-parse job for {} demos", submitted);

    let cancel_flag = {
        let mut state = state.lock().unwrap();
        state.ui_enabled = false;
        state.job.arm()
    };
    // Disable bracketing goes out on the caller's thread, ahead of anything
    // the worker will send.
    proxy.send_event(IngestEvent::UiEnabled(false));

    let worker_proxy = proxy.clone();
    let handle = tokio::task::spawn_blocking(move || {
        run_batch_job(request, parser, worker_proxy, cancel_flag);
    });
    state.lock().unwrap().job.install(handle);

    IngestOutcome::Started(submitted)
}

/// Requests cooperative cancellation of the running job, if any.
///
/// The worker polls the flag and terminates on its own; the surface is
/// re-enabled through the normal completion path.
pub fn cancel_job<P: EventProxy>(proxy: &P, state: &Arc<Mutex<AppState>>) {
    if state.lock().unwrap().job.cancel() {
        proxy.send_event(IngestEvent::Log(LogLevel::Warning, "Job cancelled".to_string()));
    }
}

const CORRUPT_STATE_HINT: &str =
    "It is highly recommended you restart the application to not work with corrupt data in memory";

/// Forwards one parser log line to the surface. A fatal-level line means the
/// parser believes shared state is corrupted, so it surfaces as an error plus
/// a one-line restart hint.
fn forward_log<P: EventProxy>(proxy: &P, level: LogLevel, text: &str) {
    match level {
        LogLevel::Fatal => {
            proxy.send_event(IngestEvent::Log(
                LogLevel::Error,
                format!("Critical error: {}", text),
            ));
            proxy.send_event(IngestEvent::Log(
                LogLevel::Fatal,
                CORRUPT_STATE_HINT.to_string(),
            ));
        }
        level => proxy.send_event(IngestEvent::Log(level, text.to_string())),
    }
}

/// Worker body. Runs the external parser to completion or cancellation and
/// reports everything through the bridge; nothing escapes as a panic or an
/// error. Every exit path converges on `UiEnabled(true)`.
fn run_batch_job<P: EventProxy>(
    request: BatchRequest,
    parser: Arc<dyn BatchParser>,
    proxy: P,
    cancel_flag: Arc<AtomicBool>,
) {
    proxy.send_event(IngestEvent::Progress(0.0));

    let progress_proxy = proxy.clone();
    let on_progress = move |fraction: f32| {
        progress_proxy.send_event(IngestEvent::Progress(fraction.clamp(0.0, 1.0)));
    };
    let log_proxy = proxy.clone();
    let on_log = move |level: LogLevel, text: &str| forward_log(&log_proxy, level, text);

    let submitted = request.file_paths.len();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        parser.parse_batch(&request, &on_progress, &on_log, &cancel_flag)
    }));

    let demos = match outcome {
        Err(_) => {
            tracing::error!("parser panicked, discarding batch of {}", submitted);
            proxy.send_event(IngestEvent::Log(
                LogLevel::Error,
                "The demo parser crashed; the whole batch was discarded".to_string(),
            ));
            proxy.send_event(IngestEvent::UiEnabled(true));
            return;
        }
        Ok(Err(ParseError::Cancelled)) => {
            tracing::info!("batch parse observed the cancellation flag");
            proxy.send_event(IngestEvent::UiEnabled(true));
            return;
        }
        Ok(Err(ParseError::Fault(message))) => {
            proxy.send_event(IngestEvent::Log(
                LogLevel::Error,
                format!("Caught an error while parsing demos: {}", message),
            ));
            proxy.send_event(IngestEvent::UiEnabled(true));
            return;
        }
        Ok(Ok(demos)) => demos,
    };

    // All-or-nothing: a result set of the wrong size means something went
    // wrong mid-batch, and no partial results are accepted.
    if demos.len() != submitted {
        proxy.send_event(IngestEvent::Log(
            LogLevel::Error,
            format!(
                "The parser returned {} results for {} demos; the whole batch was discarded",
                demos.len(),
                submitted
            ),
        ));
        proxy.send_event(IngestEvent::UiEnabled(true));
        return;
    }

    for info in demos {
        proxy.send_event(IngestEvent::DemoAdded(info));
    }
    proxy.send_event(IngestEvent::UiEnabled(true));
}
