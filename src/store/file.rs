use anyhow::{Context, Result};
use directories::ProjectDirs;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use super::traits::StateStore;
use crate::constants::STORE_FILE_NAME;

/// TOML-backed store that persists between runs.
///
/// The whole document is small (a token and a theme flag), so every write
/// rewrites the file from the in-memory view.
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at the default location under the user config dir
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(default_store_path()?))
    }

    /// Open a store backed by the given file, loading existing values
    pub fn open(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring unreadable state file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn flush(&self, values: &BTreeMap<String, String>) {
        let content = match toml::to_string_pretty(values) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to serialize state file: {}", e);
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create state directory: {}", e);
                return;
            }
        }

        if let Err(e) = fs::write(&self.path, content) {
            warn!("Failed to write state file {}: {}", self.path.display(), e);
        }
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());
        self.flush(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.lock();
        if values.remove(key).is_some() {
            self.flush(&values);
        }
    }
}

/// Get the path of the state file under the user config directory
fn default_store_path() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "stablehand") {
        Ok(proj_dirs.config_dir().join(STORE_FILE_NAME))
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("stablehand")
            .join(STORE_FILE_NAME))
    }
}
