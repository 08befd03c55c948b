//! Coincheck REST API client.
//!
//! Public market data lives in [`public`], authenticated account and trading
//! operations in [`private`]. Both are implemented on [`RestClient`].
//!
//! # Trait-based API
//!
//! The [`CoincheckClient`] trait abstracts all REST API operations, so code
//! can be written against a mock in tests:
//!
//! ```rust,ignore
//! use coincheck_api_client::rest::{CoincheckClient, RestClient};
//!
//! async fn spread<C: CoincheckClient>(client: &C) -> Result<Option<f64>, coincheck_api_client::CoincheckError> {
//!     Ok(client.get_order_book().await?.spread())
//! }
//! ```

mod client;
mod endpoints;
pub mod private;
pub mod public;
pub mod request;
mod traits;

pub use client::{DEFAULT_TIMEOUT, RestClient, RestClientBuilder};
pub use endpoints::{BTC_SENDING_FEE, COINCHECK_BASE_URL};
pub use traits::CoincheckClient;
