//! HMAC-SHA256 Request Signing
//!
//! Signs and verifies interaction requests. The signed message is the
//! timestamp header value followed by the raw request body.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Prefix the platform may put in front of the hex digest.
const SIGNATURE_PREFIX: &str = "sha256=";

/// Sign `timestamp || body` with HMAC-SHA256 and return the hex-encoded signature.
pub fn sign_payload(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Decode a header signature into raw digest bytes.
///
/// Accepts an optional `sha256=` prefix. Returns `None` if the value is not
/// valid hex of the SHA-256 output length.
pub fn decode_signature(signature: &str) -> Option<Vec<u8>> {
    let hex_part = signature
        .trim()
        .strip_prefix(SIGNATURE_PREFIX)
        .unwrap_or_else(|| signature.trim());
    let bytes = hex::decode(hex_part).ok()?;
    (bytes.len() == 32).then_some(bytes)
}

/// Verify a decoded signature against `timestamp || body`.
pub fn verify_signature(secret: &str, timestamp: &str, body: &[u8], signature: &[u8]) -> bool {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(body);
    // Constant-time comparison
    mac.verify_slice(signature).is_ok()
}

/// Check that `timestamp` (unix seconds) is within `max_age_secs` of `now`.
pub const fn timestamp_within(timestamp: i64, now: i64, max_age_secs: i64) -> bool {
    now.abs_diff(timestamp) <= max_age_secs.unsigned_abs()
}
