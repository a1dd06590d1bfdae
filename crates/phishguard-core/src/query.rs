//! Lookup input: the URL to classify plus the credential for the reputation service.

use std::fmt;
use thiserror::Error;
use url::{ParseError, Url};

/// Rejected lookup input. Reported before any network traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("no URL provided")]
    EmptyUrl,
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("URL must be absolute with a scheme and host")]
    NotAbsolute,
    #[error("API key is empty")]
    EmptyApiKey,
}

/// Opaque reputation-service credential. `Debug` and `Display` never print the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(raw: impl Into<String>) -> Result<Self, QueryError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::EmptyApiKey);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The raw key, for placing into the request path only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// One lookup request. Built fresh for every submitted URL.
#[derive(Debug, Clone)]
pub struct ReputationQuery {
    target_url: String,
    api_key: ApiKey,
}

impl ReputationQuery {
    /// Validates that `target_url` is absolute (scheme + host). The string is kept
    /// exactly as given so the service sees the URL the user shared.
    pub fn new(target_url: impl Into<String>, api_key: ApiKey) -> Result<Self, QueryError> {
        let target_url = target_url.into();
        validate_target(&target_url)?;
        Ok(Self {
            target_url,
            api_key,
        })
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}

fn validate_target(raw: &str) -> Result<(), QueryError> {
    if raw.trim().is_empty() {
        return Err(QueryError::EmptyUrl);
    }
    let parsed = match Url::parse(raw) {
        Ok(u) => u,
        Err(ParseError::RelativeUrlWithoutBase) => return Err(QueryError::NotAbsolute),
        Err(e) => return Err(QueryError::InvalidUrl(e.to_string())),
    };
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(QueryError::NotAbsolute),
    }
}
