//! The single background execution slot for batch-parse jobs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Lifecycle of the one allowed background job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Running,
    /// Cancellation was requested but the worker has not yet observed the
    /// flag and terminated. Still counts as running.
    CancelRequested,
}

/// Owns the job slot: an owned, move-only handle to the current worker plus
/// the cancellation flag it polls.
///
/// Starting a new job must first [`take_handle`](Self::take_handle) and await
/// it so two workers are never alive simultaneously.
pub struct JobController {
    task: Option<JoinHandle<()>>,
    cancel_flag: Arc<AtomicBool>,
}

impl Default for JobController {
    fn default() -> Self {
        Self {
            task: None,
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl JobController {
    pub fn state(&self) -> JobState {
        match &self.task {
            Some(task) if !task.is_finished() => {
                if self.cancel_flag.load(Ordering::SeqCst) {
                    JobState::CancelRequested
                } else {
                    JobState::Running
                }
            }
            _ => JobState::Idle,
        }
    }

    /// Removes the handle of the previous worker so the caller can await its
    /// termination without holding any lock.
    pub fn take_handle(&mut self) -> Option<JoinHandle<()>> {
        self.task.take()
    }

    /// Installs a fresh, unset cancellation flag for the next job and returns
    /// the clone to hand to the worker.
    pub fn arm(&mut self) -> Arc<AtomicBool> {
        self.cancel_flag = Arc::new(AtomicBool::new(false));
        self.cancel_flag.clone()
    }

    /// Records the handle of the worker that was just spawned.
    pub fn install(&mut self, task: JoinHandle<()>) {
        debug_assert!(self.task.is_none());
        self.task = Some(task);
    }

    /// Requests cooperative cancellation of the running job. The flag is
    /// monotonic for the lifetime of one job; the worker terminates on its
    /// own once it observes it. Returns `false` when no job is running.
    pub fn cancel(&self) -> bool {
        match self.state() {
            JobState::Running => {
                self.cancel_flag.store(true, Ordering::SeqCst);
                true
            }
            JobState::CancelRequested | JobState::Idle => false,
        }
    }
}
