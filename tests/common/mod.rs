//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use serde_json::{Value, json};
use tempfile::TempDir;

pub const HISTORY_KEY: &str = "history.recentlyOpenedPathsList";

/// Builder for editor state databases in a temp directory
pub struct StateDbBuilder {
    temp_dir: TempDir,
    file_name: String,
    entries: Vec<Value>,
    raw_payload: Option<String>,
    with_table: bool,
    with_key: bool,
}

impl StateDbBuilder {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
            file_name: "state.vscdb".to_string(),
            entries: Vec::new(),
            raw_payload: None,
            with_table: true,
            with_key: true,
        }
    }

    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    pub fn with_entry(mut self, entry: EntryBuilder) -> Self {
        self.entries.push(entry.to_json());
        self
    }

    pub fn with_folders(mut self, uris: &[&str]) -> Self {
        for uri in uris {
            self.entries.push(EntryBuilder::folder(uri).to_json());
        }
        self
    }

    /// Store `payload` verbatim instead of the built entries
    pub fn with_raw_payload(mut self, payload: &str) -> Self {
        self.raw_payload = Some(payload.to_string());
        self
    }

    /// Create `ItemTable` but leave the history key out
    pub fn without_history_key(mut self) -> Self {
        self.with_key = false;
        self
    }

    /// A valid SQLite file with no `ItemTable`
    pub fn without_table(mut self) -> Self {
        self.with_table = false;
        self
    }

    pub fn build(self) -> StateDb {
        let path = self.temp_dir.path().join(&self.file_name);
        let conn = Connection::open(&path).expect("Failed to create database");

        if self.with_table {
            conn.execute_batch(
                "CREATE TABLE ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB)",
            )
            .expect("Failed to create ItemTable");

            if self.with_key {
                let payload = self
                    .raw_payload
                    .unwrap_or_else(|| json!({ "entries": self.entries }).to_string());
                conn.execute(
                    "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)",
                    [HISTORY_KEY, payload.as_str()],
                )
                .expect("Failed to insert history");
            }
        } else {
            conn.execute_batch("CREATE TABLE other (id INTEGER)").expect("Failed to create table");
        }
        conn.close().expect("Failed to close database");

        StateDb { temp_dir: self.temp_dir, path }
    }
}

impl Default for StateDbBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A built database; the temp directory lives as long as this value
pub struct StateDb {
    temp_dir: TempDir,
    path: PathBuf,
}

impl StateDb {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Builder for entries of the recently-opened list
pub struct EntryBuilder {
    folder_uri: Option<String>,
    file_uri: Option<String>,
    label: Option<String>,
    remote_authority: Option<String>,
}

impl EntryBuilder {
    pub fn folder(uri: &str) -> Self {
        Self { folder_uri: Some(uri.to_string()), file_uri: None, label: None, remote_authority: None }
    }

    pub fn file(uri: &str) -> Self {
        Self { folder_uri: None, file_uri: Some(uri.to_string()), label: None, remote_authority: None }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn remote_authority(mut self, authority: &str) -> Self {
        self.remote_authority = Some(authority.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut entry = serde_json::Map::new();
        if let Some(uri) = &self.folder_uri {
            entry.insert("folderUri".to_string(), json!(uri));
        }
        if let Some(uri) = &self.file_uri {
            entry.insert("fileUri".to_string(), json!(uri));
        }
        if let Some(label) = &self.label {
            entry.insert("label".to_string(), json!(label));
        }
        if let Some(authority) = &self.remote_authority {
            entry.insert("remoteAuthority".to_string(), json!(authority));
        }
        Value::Object(entry)
    }
}

/// The mixed history used across tests: WSL folder, a file, a local folder
pub fn sample_db() -> StateDb {
    StateDbBuilder::new()
        .with_entry(EntryBuilder::folder("vscode-remote://wsl+Ubuntu/home/a").remote_authority("wsl+Ubuntu"))
        .with_entry(EntryBuilder::file("file:///x.txt"))
        .with_entry(EntryBuilder::folder("file:///c%3A/proj"))
        .build()
}
