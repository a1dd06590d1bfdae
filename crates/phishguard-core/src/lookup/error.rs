//! Lookup failure type.

use thiserror::Error;

/// Every way a lookup can fail: transport error, non-2xx status, undecodable
/// body, or cancellation. The reason is diagnostic text for logs; callers treat
/// all failures alike and must not branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("reputation lookup failed: {reason}")]
    Failed { reason: String },
}

impl LookupError {
    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        LookupError::Failed {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            LookupError::Failed { reason } => reason,
        }
    }
}

impl From<curl::Error> for LookupError {
    fn from(e: curl::Error) -> Self {
        LookupError::failed(format!("curl: {}", e))
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        LookupError::failed(format!("decode: {}", e))
    }
}
