//! Entry loading from a JSON entries file
//!
//! The file holds a JSON array of entries. Records that fail to
//! deserialize or validate are skipped with a warning so one bad
//! row never hides the rest of the history.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{Entry, Result};

pub struct EntryLoader {
    path: PathBuf,
}

impl EntryLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every valid entry. A missing file yields no entries.
    pub fn load(&self) -> Result<Vec<Entry>> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "entries file not found");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let entries = Self::parse(&content)?;
        debug!(path = %self.path.display(), count = entries.len(), "loaded entries");
        Ok(entries)
    }

    /// Parse a JSON array, dropping records that are malformed or invalid.
    pub fn parse(content: &str) -> Result<Vec<Entry>> {
        let records: Vec<Value> = serde_json::from_str(content)?;
        let mut entries = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let entry: Entry = match serde_json::from_value(record) {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(index, %err, "skipping malformed entry");
                    continue;
                }
            };
            if let Err(err) = entry.validate() {
                warn!(index, %err, "skipping invalid entry");
                continue;
            }
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Write entries as a pretty-printed JSON array, creating parent dirs.
    pub fn save(&self, entries: &[Entry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
