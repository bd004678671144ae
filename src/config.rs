use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_DATA_DIR: &str = ".todo-cache";
pub const DATA_DIR_ENV: &str = "TODO_CACHE_DIR";

/// Names of the persisted resources inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub json_file: String,
    pub csv_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            json_file: "TodoList.json".to_string(),
            csv_file: "TodoList.csv".to_string(),
        }
    }
}

impl StoreConfig {
    /// Read `config.yaml` from `dir`, falling back to defaults when the file
    /// does not exist. Keys missing from the file keep their defaults.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        let config = serde_yaml::from_str(&raw)?;
        Ok(config)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let yaml = serde_yaml::to_string(self)?;
        fs::write(dir.join(CONFIG_FILE), yaml)?;
        Ok(())
    }
}

/// Explicit flag, then `TODO_CACHE_DIR`, then `./.todo-cache`.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }

    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}
