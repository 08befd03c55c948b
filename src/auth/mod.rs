//! Authentication module for the Coincheck API.
//!
//! This module provides:
//! - Validated credentials with secure secret storage
//! - Nonce generation for replay attack prevention
//! - HMAC-SHA256 signature generation for authenticated requests

mod credentials;
mod nonce;
mod signature;

pub use credentials::{API_KEY_VAR, API_SECRET_VAR, Credentials};
pub use nonce::{IncreasingNonce, NonceProvider, SequentialNonce};
pub use signature::sign_request;
