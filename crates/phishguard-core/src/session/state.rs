//! Per-URL check state: `Idle -> Checking -> {Genuine, Malicious, Error}`.

use std::sync::atomic::AtomicBool;

use crate::lookup::ApiClient;
use crate::query::ReputationQuery;
use crate::verdict::{self, Verdict};

/// Why a check ended in `Error`. All variants render the same to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// The submitted text was not an absolute URL.
    InvalidQuery(String),
    /// Transport, HTTP status, or decode failure.
    Lookup(String),
    /// The service answered with `success: false`; carries its message.
    ApiReported { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Idle,
    Checking {
        url: String,
    },
    Genuine(Verdict),
    Malicious(Verdict),
    Error(CheckFailure),
}

impl CheckState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckState::Genuine(_) | CheckState::Malicious(_) | CheckState::Error(_)
        )
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            CheckState::Genuine(v) | CheckState::Malicious(v) => Some(v),
            _ => None,
        }
    }

    /// Short lowercase name, used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckState::Idle => "idle",
            CheckState::Checking { .. } => "checking",
            CheckState::Genuine(_) => "genuine",
            CheckState::Malicious(_) => "malicious",
            CheckState::Error(_) => "error",
        }
    }

    fn from_verdict(v: Verdict) -> Self {
        if v.is_genuine {
            CheckState::Genuine(v)
        } else {
            CheckState::Malicious(v)
        }
    }
}

/// Lookup then evaluate; always ends in a terminal state. Blocking.
pub fn run_check(client: &ApiClient, query: &ReputationQuery, abort: &AtomicBool) -> CheckState {
    let result = match client.lookup_with_abort(query, abort) {
        Ok(r) => r,
        Err(e) => return CheckState::Error(CheckFailure::Lookup(e.reason().to_string())),
    };
    match verdict::evaluate(&result) {
        Some(v) => CheckState::from_verdict(v),
        None => {
            tracing::warn!(
                request_id = %result.request_id,
                "reputation service reported failure: {}",
                result.message
            );
            CheckState::Error(CheckFailure::ApiReported {
                message: result.message,
            })
        }
    }
}
