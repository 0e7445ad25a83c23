//! Request Authentication
//!
//! Verifies that inbound interaction requests were signed by the action
//! platform with the shared signing secret.

mod error;
mod middleware;
pub mod signature;

pub use error::{AuthError, AuthResult};
pub use middleware::{require_signature, MAX_BODY_BYTES, SIGNATURE_HEADER, TIMESTAMP_HEADER};
