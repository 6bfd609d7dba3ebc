//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "insight-router";
const PROJECT_FILES: [&str; 2] = ["insight-router.toml", ".insight-router.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./insight-router.toml` or `./.insight-router.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/insight-router/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// `$XDG_CONFIG_HOME/insight-router/config.toml` (or the platform
    /// equivalent).
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used, one line each.
    pub fn describe_sources(explicit: Option<&Path>) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("[{:>7}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("[  FOUND] Project: {}", path.display())),
            None => lines.push(format!(
                "[       ] Project: ./{} or ./{}",
                PROJECT_FILES[0], PROJECT_FILES[1]
            )),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "  FOUND" } else { "       " };
            lines.push(format!("[{}] Global:  {}", mark, path.display()));
        }

        lines.push("[       ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.router.cost_optimization);
        assert_eq!(config.providers.fast.model, "gpt-4o-mini");
    }

    #[test]
    fn test_global_config_path_is_namespaced() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("insight-router"));
    }

    #[test]
    fn test_explicit_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[router]
quality_first = true

[providers.fast]
model = "local-small"

[execution]
timeout_seconds = 15
"#
        )
        .unwrap();

        let config = ConfigLoader::load(Some(file.path())).unwrap();
        assert!(config.router.quality_first);
        assert!(config.router.cost_optimization);
        assert_eq!(config.providers.fast.model, "local-small");
        // Untouched fields of a partial section keep that provider's defaults
        assert!(config.providers.fast.image_endpoint.is_some());
        assert_eq!(config.providers.quality.model, "gpt-4o");
        assert_eq!(config.execution.timeout_seconds, Some(15));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[router]\nquality_first = \"sometimes\"").unwrap();
        assert!(ConfigLoader::load(Some(file.path())).is_err());
    }
}
