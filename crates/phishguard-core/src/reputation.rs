//! Decoded reputation-service response.

use serde::{Deserialize, Serialize};

/// A fully decoded response body. Every field is required: a body missing any of
/// them (or carrying the wrong type) fails to decode instead of producing a
/// partially filled value. Fields the service adds beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationResult {
    /// Success flag reported by the service, distinct from transport success.
    #[serde(rename = "success")]
    pub succeeded: bool,
    pub message: String,

    pub r#unsafe: bool,
    pub suspicious: bool,
    pub phishing: bool,
    pub malware: bool,
    pub spamming: bool,
    pub adult: bool,
    pub parking: bool,
    pub redirected: bool,
    pub dns_valid: bool,

    pub domain: String,
    pub root_domain: String,
    pub ip_address: String,
    pub country_code: String,
    pub language_code: String,
    pub server: String,
    pub content_type: String,
    pub domain_trust: String,
    pub category: String,
    pub request_id: String,

    pub status_code: i64,
    pub page_size: i64,
    pub domain_rank: i64,
    pub risk_score: i64,
}
