//! Provider adapters
//!
//! The HTTP adapter is compiled with the `http-providers` feature.

pub mod prompt;

#[cfg(feature = "http-providers")]
mod http_adapter;

#[cfg(feature = "http-providers")]
pub use http_adapter::HttpProviderAdapter;
