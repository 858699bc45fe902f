//! Runtime configuration: where entries live and where reports go

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::report::ReportFormat;
use crate::types::{ReportError, Result};

const DATA_DIR_NAME: &str = ".volhours";
const ENTRIES_FILE: &str = "entries.json";

#[derive(Debug, Clone)]
pub struct Config {
    data_dir: PathBuf,
    output_dir: PathBuf,
    default_format: ReportFormat,
}

impl Config {
    /// Defaults rooted at `~/.volhours`, writing reports to the current directory.
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| ReportError::Config("Cannot determine home directory".into()))?;
        Ok(Self::with_data_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            output_dir: PathBuf::from("."),
            default_format: ReportFormat::default(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_default_format(mut self, format: ReportFormat) -> Self {
        self.default_format = format;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn entries_path(&self) -> PathBuf {
        self.data_dir.join(ENTRIES_FILE)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn default_format(&self) -> ReportFormat {
        self.default_format
    }

    /// Full path a report with this filename would be written to
    pub fn output_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(filename)
    }
}
