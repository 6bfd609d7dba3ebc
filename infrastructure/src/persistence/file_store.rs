//! JSON file state store.
//!
//! Each key is one file, `<state_dir>/<key>.json`, rewritten in full on
//! every save through a temp file and an atomic rename so a crash never
//! leaves a half-written blob behind.

use insight_application::ports::state_store::{StateStore, StoreError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl StateStore for FileStateStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&self, key: &str, json: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&temp_path).map_err(io_err)?;
            file.write_all(json.as_bytes()).map_err(io_err)?;
            file.sync_all().map_err(io_err)?;
        }
        fs::rename(&temp_path, &path).map_err(io_err)?;

        debug!("Saved {} ({} bytes)", path.display(), json.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path());
        assert!(store.load("router_config").unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("nested"));

        store.save("performance_metrics", "[]").unwrap();
        store.save("performance_metrics", r#"[{"a":1}]"#).unwrap();

        assert_eq!(
            store.load("performance_metrics").unwrap().as_deref(),
            Some(r#"[{"a":1}]"#)
        );
        assert!(dir.path().join("nested/performance_metrics.json").exists());
        assert!(!dir.path().join("nested/performance_metrics.json.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path());
        assert!(matches!(
            store.save("../escape", "{}"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.load(""), Err(StoreError::InvalidKey(_))));
    }
}
