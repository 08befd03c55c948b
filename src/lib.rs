//! # Coincheck Client
//!
//! An async Rust client library for the Coincheck exchange REST API.
//!
//! ## Features
//!
//! - Public market data: ticker, trades, order book, rates
//! - Account, balance, bitcoin send/deposit history
//! - Order placement, cancellation and fills
//! - HMAC-SHA256 request signing with strictly increasing nonces
//! - Strong typing for all request/response types
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coincheck_api_client::rest::RestClient;
//! use coincheck_api_client::types::Pair;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::new();
//!     let rate = client.get_rate(Pair::BtcJpy).await?;
//!     println!("BTC/JPY: {rate}");
//!     Ok(())
//! }
//! ```
//!
//! ## Credentials
//!
//! Private endpoints need an access key and secret. They can be read from
//! `COINCHECK_API_KEY` and `COINCHECK_API_SECRET`:
//!
//! ```rust,no_run
//! use coincheck_api_client::auth::Credentials;
//! use coincheck_api_client::rest::RestClient;
//!
//! let client = RestClient::builder()
//!     .credentials(Credentials::from_env()?)
//!     .build();
//! # Ok::<(), coincheck_api_client::CoincheckError>(())
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::CoincheckError;
pub use types::common::{OrderType, Pair, TradeSide};

/// Result type alias using CoincheckError
pub type Result<T> = std::result::Result<T, CoincheckError>;
