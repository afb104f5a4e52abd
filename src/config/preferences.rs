//! Persisted preferences: a tiny string key-value store.
//!
//! Stored as pretty JSON at `<config dir>/recent-workspaces/preferences.json`
//! - macOS: `~/Library/Application Support/recent-workspaces/`
//! - Linux: `~/.config/recent-workspaces/`
//! - Windows: `%APPDATA%\recent-workspaces\`

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Key under which the history database location is kept
pub const DATABASE_PATH_KEY: &str = "database_path";

const APP_DIR_NAME: &str = "recent-workspaces";
const PREFERENCES_FILENAME: &str = "preferences.json";

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    /// Store at the platform config location
    pub fn open_default() -> Result<Self> {
        let config_dir = dirs::config_dir().context("Failed to get platform config directory")?;
        Ok(Self::at(config_dir.join(APP_DIR_NAME).join(PREFERENCES_FILENAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences: {}", self.path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse preferences: {}", self.path.display()))
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.load().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create preferences directory")?;
        }

        // Write atomically (temp file + rename)
        let temp_path = self.path.with_extension("json.tmp");
        let json =
            serde_json::to_string_pretty(&values).context("Failed to serialize preferences")?;
        fs::write(&temp_path, json).context("Failed to write preferences temp file")?;
        fs::rename(&temp_path, &self.path).context("Failed to rename preferences temp file")?;

        Ok(())
    }
}

/// In-memory preferences for tests and one-off sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
