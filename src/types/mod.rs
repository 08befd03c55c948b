//! Common types used across the Coincheck client library.

pub mod common;
pub mod decode;

pub use common::*;
