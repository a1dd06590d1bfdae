//! Reputation lookup over HTTPS.
//!
//! Uses the curl crate (libcurl) to issue a single GET against the reputation
//! endpoint and decodes the JSON body into a `ReputationResult`. One attempt
//! per call: there is no retry and no cache.

mod error;
mod parse;
mod request;

pub use error::LookupError;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::PhishguardConfig;
use crate::query::{ApiKey, QueryError, ReputationQuery};
use crate::reputation::ReputationResult;

/// Upper bound on a response body; the real payload is well under 4 KiB.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// HTTP client for the reputation service. Holds the endpoint, timeouts and
/// the credential loaded at startup; immutable after construction.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    api_key: ApiKey,
    connect_timeout: Duration,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(20),
        }
    }

    pub fn from_config(cfg: &PhishguardConfig, api_key: ApiKey) -> Self {
        Self::new(cfg.base_url.clone(), api_key).with_timeouts(
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.timeout = timeout;
        self
    }

    /// Build a query for `target_url` carrying this client's key.
    pub fn query_for(&self, target_url: &str) -> Result<ReputationQuery, QueryError> {
        ReputationQuery::new(target_url, self.api_key.clone())
    }

    /// Performs the lookup. Blocks the current thread for the round-trip;
    /// call from `spawn_blocking` if used from async code.
    pub fn lookup(&self, query: &ReputationQuery) -> Result<ReputationResult, LookupError> {
        let never = AtomicBool::new(false);
        self.lookup_with_abort(query, &never)
    }

    /// Like `lookup`, but stops the transfer once `abort` is set.
    pub fn lookup_with_abort(
        &self,
        query: &ReputationQuery,
        abort: &AtomicBool,
    ) -> Result<ReputationResult, LookupError> {
        let url = request::build_request_url(&self.base_url, query)?;
        let shown = request::redacted(&url);
        tracing::debug!(url = %shown, "reputation lookup");

        let result = self.perform(&url, abort).and_then(|body| parse::decode_body(&body));
        match &result {
            Ok(r) => tracing::debug!(
                request_id = %r.request_id,
                risk_score = r.risk_score,
                success = r.succeeded,
                "reputation lookup finished"
            ),
            Err(e) => tracing::warn!(url = %shown, "{}", e),
        }
        result
    }

    fn perform(&self, url: &url::Url, abort: &AtomicBool) -> Result<Vec<u8>, LookupError> {
        if abort.load(Ordering::Relaxed) {
            return Err(LookupError::failed("cancelled"));
        }

        let mut body: Vec<u8> = Vec::new();
        let mut overflow = false;

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(5)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        easy.progress(true)?;

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if body.len() + data.len() > MAX_BODY_BYTES {
                    overflow = true;
                    return Ok(0); // abort transfer
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            // Returning false aborts the transfer.
            transfer.progress_function(|_, _, _, _| !abort.load(Ordering::Relaxed))?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if abort.load(Ordering::Relaxed) {
                return Err(LookupError::failed("cancelled"));
            }
            if overflow {
                return Err(LookupError::failed(format!(
                    "response body exceeds {} bytes",
                    MAX_BODY_BYTES
                )));
            }
            return Err(LookupError::failed(format!("GET request failed: {}", e)));
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(LookupError::failed(format!("HTTP {}", code)));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("https://h.test/api/json/url", ApiKey::new("K").unwrap())
    }

    #[test]
    fn from_config_uses_timeouts() {
        let cfg = PhishguardConfig {
            connect_timeout_secs: 3,
            timeout_secs: 7,
            ..PhishguardConfig::default()
        };
        let c = ApiClient::from_config(&cfg, ApiKey::new("K").unwrap());
        assert_eq!(c.connect_timeout, Duration::from_secs(3));
        assert_eq!(c.timeout, Duration::from_secs(7));
        assert_eq!(c.base_url, cfg.base_url);
    }

    #[test]
    fn query_for_validates_target() {
        let c = client();
        assert!(c.query_for("https://safe.example").is_ok());
        assert_eq!(c.query_for("").unwrap_err(), QueryError::EmptyUrl);
    }

    #[test]
    fn pre_cancelled_lookup_makes_no_request() {
        let c = client();
        let q = c.query_for("https://safe.example").unwrap();
        let abort = AtomicBool::new(true);
        let err = c.lookup_with_abort(&q, &abort).unwrap_err();
        assert_eq!(err.reason(), "cancelled");
    }

    #[test]
    fn bad_base_url_fails_without_panicking() {
        let c = ApiClient::new("::nope::", ApiKey::new("K").unwrap());
        let q = c.query_for("https://safe.example").unwrap();
        assert!(matches!(c.lookup(&q), Err(LookupError::Failed { .. })));
    }

    #[test]
    fn debug_does_not_leak_key() {
        let c = ApiClient::new("https://h.test", ApiKey::new("TOPSECRET").unwrap());
        assert!(!format!("{c:?}").contains("TOPSECRET"));
    }
}
