//! Callback Delivery
//!
//! Out-of-band HTTP POST of interaction replies to the callback URL supplied
//! in the interaction's action context, with SSRF protection.

pub mod dispatch;
pub mod error;
pub mod ssrf;

pub use dispatch::CallbackDispatcher;
pub use error::CallbackError;
