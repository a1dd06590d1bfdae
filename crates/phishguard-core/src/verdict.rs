//! Genuineness decision over a reputation result.
//!
//! A URL is genuine when none of the six risk flags (`unsafe`, `suspicious`,
//! `phishing`, `malware`, `spamming`, `adult`) is set. `parking`, `redirected`,
//! `dns_valid`, `domain_rank` and `domain_trust` are display-only and never
//! change the outcome.

use serde::Serialize;

use crate::reputation::ReputationResult;

/// Display payload derived from one `ReputationResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub is_genuine: bool,
    pub risk_score: i64,
    pub display_domain: String,
    pub r#unsafe: bool,
    pub suspicious: bool,
    pub phishing: bool,
    pub malware: bool,
    pub spamming: bool,
    pub adult: bool,
}

/// Returns `None` when the service reported failure (`success: false`); callers
/// treat that the same as a failed lookup.
pub fn evaluate(result: &ReputationResult) -> Option<Verdict> {
    if !result.succeeded {
        return None;
    }
    let is_genuine = !(result.r#unsafe
        || result.suspicious
        || result.phishing
        || result.malware
        || result.spamming
        || result.adult);
    Some(Verdict {
        is_genuine,
        risk_score: result.risk_score,
        display_domain: result.domain.clone(),
        r#unsafe: result.r#unsafe,
        suspicious: result.suspicious,
        phishing: result.phishing,
        malware: result.malware,
        spamming: result.spamming,
        adult: result.adult,
    })
}
