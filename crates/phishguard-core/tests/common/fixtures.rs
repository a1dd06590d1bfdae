//! Canned reputation-service response bodies.

use serde_json::{json, Value};

/// A complete, successful body for `safe.example` with every risk flag clear.
pub fn clean_body() -> Value {
    json!({
        "message": "Success.",
        "success": true,
        "unsafe": false,
        "domain": "safe.example",
        "root_domain": "safe.example",
        "ip_address": "93.184.216.34",
        "country_code": "US",
        "language_code": "en",
        "server": "ECS",
        "content_type": "text/html; charset=UTF-8",
        "status_code": 200,
        "page_size": 1256,
        "domain_rank": 0,
        "dns_valid": true,
        "parking": false,
        "spamming": false,
        "malware": false,
        "phishing": false,
        "suspicious": false,
        "domain_trust": "not suspicious",
        "adult": false,
        "risk_score": 5,
        "category": "N/A",
        "redirected": false,
        "request_id": "4Ha1bK2yjW"
    })
}

/// `clean_body` with the given fields overwritten.
pub fn body_with(overrides: Value) -> String {
    let mut body = clean_body();
    if let (Some(target), Some(extra)) = (body.as_object_mut(), overrides.as_object()) {
        for (k, v) in extra {
            target.insert(k.clone(), v.clone());
        }
    }
    body.to_string()
}

/// `clean_body` with one field removed.
pub fn body_without(field: &str) -> String {
    let mut body = clean_body();
    if let Some(obj) = body.as_object_mut() {
        obj.remove(field);
    }
    body.to_string()
}
