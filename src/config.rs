//! Where the roster keeps its files.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "STUDENT_ROSTER_HOME";
/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "STUDENT_ROSTER_LOG";
/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".student-roster";
const STUDENTS_FILE_NAME: &str = "students.csv";
const RESULTS_FILE_NAME: &str = "results.csv";
const LOG_FILE_NAME: &str = "roster.log";
const DEFAULT_LOG_FILTER: &str = "info";

/// Resolved file locations plus the log filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub students_file: PathBuf,
    pub results_file: PathBuf,
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Resolve from `STUDENT_ROSTER_HOME`, falling back to
    /// `~/.student-roster`.
    pub fn from_env() -> Result<Self> {
        let data_dir = match env::var_os(HOME_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };
        let log_filter = env::var(LOG_ENV)
            .ok()
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let mut config = Self::in_dir(data_dir);
        config.log_filter = log_filter;
        Ok(config)
    }

    /// Lay out every file inside `data_dir` with the default log filter.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            students_file: data_dir.join(STUDENTS_FILE_NAME),
            results_file: data_dir.join(RESULTS_FILE_NAME),
            log_file: data_dir.join(LOG_FILE_NAME),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            data_dir,
        }
    }

    /// Create the data directory if it does not exist yet.
    pub fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("failed to create data directory {}", self.data_dir.display())
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
