//! Infrastructure layer for insight-router
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod parsing;
pub mod persistence;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileExecutionConfig, FileLoggingConfig, FileOutputConfig,
    FileProviderConfig, FileProvidersConfig, FileStorageConfig,
};
pub use logging::JsonlEventLogger;
pub use parsing::RegexResponseParser;
pub use persistence::{FileStateStore, MemoryStateStore};
#[cfg(feature = "http-providers")]
pub use providers::HttpProviderAdapter;
