//! Decode a response body into `ReputationResult`.

use super::error::LookupError;
use crate::reputation::ReputationResult;

pub(crate) fn decode_body(body: &[u8]) -> Result<ReputationResult, LookupError> {
    Ok(serde_json::from_slice(body)?)
}
