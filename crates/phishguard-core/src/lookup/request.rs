//! Request URL construction: `<base>/<api_key>?url=<encoded target>`.

use url::Url;

use super::error::LookupError;
use crate::query::ReputationQuery;

/// Builds the GET URL. The key becomes one percent-encoded path segment and
/// the target URL the form-encoded `url` query parameter.
pub(crate) fn build_request_url(
    base_url: &str,
    query: &ReputationQuery,
) -> Result<Url, LookupError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| LookupError::failed(format!("invalid base URL {}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| LookupError::failed(format!("base URL {} cannot carry a path", base_url)))?
        .pop_if_empty()
        .push(query.api_key().expose());
    url.query_pairs_mut()
        .clear()
        .append_pair("url", query.target_url());
    Ok(url)
}

/// The request URL with the key segment masked, for logging.
pub(crate) fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    if let Ok(mut segments) = shown.path_segments_mut() {
        segments.pop().push("REDACTED");
    }
    shown.to_string()
}
