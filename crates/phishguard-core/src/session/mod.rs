//! Check session: one "screen" worth of state.
//!
//! A session accepts URL submissions, runs each lookup on a background task and
//! applies the resulting state transition on the caller's side once the task
//! completes. Submitting a new URL while a check is in flight cancels the
//! stale one, so only the latest submission can ever reach a terminal state.

mod handle;
mod state;

pub use handle::{spawn_check, CheckHandle};
pub use state::{run_check, CheckFailure, CheckState};

use std::sync::Arc;

use crate::lookup::ApiClient;

pub struct CheckSession {
    client: Arc<ApiClient>,
    state: CheckState,
    pending: Option<CheckHandle>,
}

impl CheckSession {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: CheckState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> &CheckState {
        &self.state
    }

    /// Submit a URL: cancels any in-flight check and enters `Checking`.
    /// Input that is not an absolute URL goes straight to `Error`.
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, url: &str) -> &CheckState {
        if let Some(stale) = self.pending.take() {
            stale.cancel();
            tracing::debug!("cancelled stale check");
        }
        match self.client.query_for(url) {
            Ok(query) => {
                self.state = CheckState::Checking {
                    url: url.to_string(),
                };
                self.pending = Some(spawn_check(Arc::clone(&self.client), query));
            }
            Err(e) => {
                tracing::info!("rejected submission: {}", e);
                self.state = CheckState::Error(CheckFailure::InvalidQuery(e.to_string()));
            }
        }
        &self.state
    }

    /// Wait for the in-flight check (if any) and apply its transition.
    pub async fn settle(&mut self) -> &CheckState {
        if let Some(handle) = self.pending.take() {
            if let Some(next) = handle.outcome().await {
                tracing::debug!(state = next.as_str(), "check settled");
                self.state = next;
            }
        }
        &self.state
    }

    /// `submit` followed by `settle`.
    pub async fn check(&mut self, url: &str) -> &CheckState {
        self.submit(url);
        self.settle().await
    }

    /// Cancel the in-flight check, e.g. when the screen closes.
    pub fn close(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}
