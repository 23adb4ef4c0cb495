//! Durable storage for database connection parameters.
//!
//! A single JSON document under the application base directory holds
//! the last saved [`ConnectionConfig`]. It is re-read at startup to
//! seed the settings registry. Saves replace the file as a whole via a
//! sibling temporary and an atomic rename; a reader never observes a
//! half-written document.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use domain::models::ConnectionConfig;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Well-known file name under the application base directory.
pub const CONFIG_FILE_NAME: &str = "database_config.json";

/// Error type for configuration storage.
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    /// The file exists but is not a valid configuration document.
    /// Never recovered automatically; the operator decides what to do
    /// with the broken file.
    #[error("Configuration file is corrupt: {reason}")]
    Corrupt { reason: String },

    #[error("Configuration file I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Storage for the persisted connection configuration.
pub trait ConfigStore: Send + Sync {
    /// Replaces the stored configuration atomically.
    fn save(&self, config: &ConnectionConfig) -> Result<(), ConfigStoreError>;

    /// Reads the stored configuration.
    ///
    /// Returns `Ok(None)` when no file exists. A present but malformed
    /// file is an error, never a silent `None`.
    fn load(&self) -> Result<Option<ConnectionConfig>, ConfigStoreError>;
}

/// [`ConfigStore`] backed by a JSON file on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    /// Creates a store rooted at the application base directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: base_dir.as_ref().join(CONFIG_FILE_NAME),
        }
    }

    /// Path of the persisted file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonConfigStore {
    fn save(&self, config: &ConnectionConfig) -> Result<(), ConfigStoreError> {
        let bytes = serde_json::to_vec_pretty(config)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<ConnectionConfig>, ConfigStoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ConfigStoreError::Corrupt {
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::DatabaseType;
    use tempfile::TempDir;

    fn sample() -> ConnectionConfig {
        ConnectionConfig {
            db_type: DatabaseType::Postgresql,
            host: "10.0.0.5".to_string(),
            port: 5432,
            name: "acct".to_string(),
            user: "u".to_string(),
            password: "p".to_string(),
        }
    }

    #[test]
    fn test_load_absent_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path());

        store.save(&sample()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_save_is_byte_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path());

        store.save(&sample()).unwrap();
        let first = fs::read(store.path()).unwrap();
        store.save(&sample()).unwrap();
        let second = fs::read(store.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_leaves_no_sibling_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path());
        store.save(&sample()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![CONFIG_FILE_NAME]);
    }

    #[test]
    fn test_load_truncated_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path());
        fs::write(store.path(), "{ \"type\":").unwrap();

        match store.load() {
            Err(ConfigStoreError::Corrupt { .. }) => {}
            other => panic!("Expected Corrupt, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_required_field_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path());
        fs::write(store.path(), r#"{"type": "postgresql", "host": "db"}"#).unwrap();

        assert!(matches!(
            store.load(),
            Err(ConfigStoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_load_does_not_delete_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path());
        fs::write(store.path(), "not json").unwrap();

        let _ = store.load();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_overwrites_previous_config() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path());
        store.save(&sample()).unwrap();

        let mut updated = sample();
        updated.host = "10.0.0.9".to_string();
        store.save(&updated).unwrap();

        assert_eq!(store.load().unwrap().unwrap().host, "10.0.0.9");
    }

    #[test]
    fn test_saved_document_is_human_readable() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path());
        store.save(&sample()).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"type\": \"postgresql\""));
        assert!(text.contains("\"host\": \"10.0.0.5\""));
        assert!(text.ends_with('\n'));
    }
}
