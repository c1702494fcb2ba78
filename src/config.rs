//! Application settings read from `config.toml` in the platform config dir.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::table::PAGE_SIZE;
use crate::infra::source::csv::CsvUserSource;
use crate::infra::source::generated::{GeneratedUsers, DEFAULT_GENERATED_USERS};
use crate::usecase::ports::source::UserSource;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to resolve config directory")]
    NoConfigDir,
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Rows per table page.
    pub page_size: usize,

    /// Quiet period before a search edit is applied.
    pub debounce_ms: u64,

    /// Size of the generated record set when no csv is configured.
    pub generated_users: usize,

    /// Load users from this csv instead of generating them.
    pub csv_source: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    /// Can be overridden by RUST_LOG env var
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            generated_users: DEFAULT_GENERATED_USERS,
            csv_source: None,
            log_level: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(path, &content)
    }

    /// Loads `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let project_dirs = project_dirs().ok_or(ConfigError::NoConfigDir)?;
        Ok(project_dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn user_source(&self) -> Arc<dyn UserSource> {
        match &self.csv_source {
            Some(path) => Arc::new(CsvUserSource::new(path.clone())),
            None => Arc::new(GeneratedUsers {
                count: self.generated_users,
            }),
        }
    }

    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "user-table")
}
