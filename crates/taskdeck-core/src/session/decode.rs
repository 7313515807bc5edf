//! Best-effort identity extraction from an access token.
//!
//! The payload is read without verifying the signature. The result is only
//! used for display (profile links); authorization stays with the backend.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;

/// Returns the `sub` claim of a JWT-shaped token.
///
/// Only the second segment is read. It may use either base64 alphabet, with
/// or without padding. Any failure (no payload segment, bad base64, non-JSON
/// payload, missing or non-string claim) yields `None`.
pub fn decode_subject(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let payload = payload
        .trim_end_matches('=')
        .replace('-', "+")
        .replace('_', "/");
    let decoded = STANDARD_NO_PAD.decode(payload).ok()?;
    let json: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    json.get("sub")
        .and_then(|v| v.as_str())
        .map(std::string::ToString::to_string)
}
