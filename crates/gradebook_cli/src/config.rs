//! Runtime configuration resolved from flags and environment.
//!
//! # Invariants
//! - `data_dir` is absolute once resolved (logging requires it).
//! - The database and log locations are always derived from `data_dir`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "gradebook";
const FALLBACK_DATA_DIR: &str = ".gradebook";
const DB_FILE_NAME: &str = "gradebook.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub assume_yes: bool,
}

impl CliConfig {
    /// Resolves configuration. Explicit values win over platform defaults.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        log_level: Option<String>,
        assume_yes: bool,
    ) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let data_dir = absolutize(&data_dir)?;
        let log_level = log_level
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| gradebook_core::default_log_level().to_string());

        Ok(Self {
            data_dir,
            log_level,
            assume_yes,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}
