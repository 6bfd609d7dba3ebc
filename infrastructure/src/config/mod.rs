//! Configuration file loading for insight-router
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./insight-router.toml` or `./.insight-router.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/insight-router/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileExecutionConfig, FileLoggingConfig, FileOutputConfig, FileProviderConfig,
    FileProvidersConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
