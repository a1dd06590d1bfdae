//! Cancellable background lookup.
//!
//! The curl transfer runs on tokio's blocking pool. The handle owns both the
//! join handle and the abort token; cancelling (or dropping the handle) sets
//! the token, curl stops at its next progress callback, and the result is
//! discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::state::{self, CheckFailure, CheckState};
use crate::lookup::ApiClient;
use crate::query::ReputationQuery;

pub struct CheckHandle {
    abort: Arc<AtomicBool>,
    task: Option<JoinHandle<CheckState>>,
}

/// Start a check in the background. Must be called from within a tokio runtime.
pub fn spawn_check(client: Arc<ApiClient>, query: ReputationQuery) -> CheckHandle {
    let abort = Arc::new(AtomicBool::new(false));
    let token = Arc::clone(&abort);
    let task = tokio::task::spawn_blocking(move || state::run_check(&client, &query, &token));
    CheckHandle {
        abort,
        task: Some(task),
    }
}

impl CheckHandle {
    /// Request cancellation. The outcome of a cancelled check is never delivered.
    pub fn cancel(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.abort.load(Ordering::Relaxed)
    }

    /// Wait for the terminal state. Returns `None` if the check was cancelled.
    ///
    /// The join handle stays in `self` until the task has finished, so dropping
    /// this future part-way still cancels the lookup.
    pub async fn outcome(mut self) -> Option<CheckState> {
        let joined = self.task.as_mut()?.await;
        self.task = None;
        if self.is_cancelled() {
            tracing::debug!("discarding result of cancelled check");
            return None;
        }
        match joined {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!("check task failed: {}", e);
                Some(CheckState::Error(CheckFailure::Lookup(format!(
                    "check task failed: {}",
                    e
                ))))
            }
        }
    }
}

impl Drop for CheckHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            self.cancel();
        }
    }
}
