use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const ENV_DATA_DIR: &str = "PAYOFF_DATA_DIR";
const ENV_DB: &str = "PAYOFF_DB";
const ENV_LOG: &str = "PAYOFF_LOG";

/// Where Payoff keeps its files and how chatty the log is.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    /// Resolve paths from the environment, falling back to the platform data
    /// directory. Creates the data directory if needed.
    pub(crate) fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = match lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = lookup(ENV_DB)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("payoff.db"));
        let log_filter = lookup(ENV_LOG)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "info".to_string());

        Ok(Self {
            log_path: data_dir.join("payoff.log"),
            data_dir,
            db_path,
            log_filter,
        })
    }

    pub(crate) fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "payoff", "Payoff")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}
