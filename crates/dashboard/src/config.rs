//! Process configuration from environment variables.
//!
//! | variable             | meaning                                   | default        |
//! |----------------------|-------------------------------------------|----------------|
//! | `ATELIER_LOG_FORMAT` | `json`, `pretty` or `compact`             | `json`         |
//! | `ATELIER_SEARCH`     | product search term applied to the report | empty (all)    |
//! | `ATELIER_SEED`       | path to a JSON seed file                  | built-in seed  |
//!
//! `RUST_LOG` controls the log filter.

use std::path::PathBuf;

use thiserror::Error;

use atelier_observability::{LogFormat, UnknownLogFormat};

pub const LOG_FORMAT_VAR: &str = "ATELIER_LOG_FORMAT";
pub const SEARCH_VAR: &str = "ATELIER_SEARCH";
pub const SEED_VAR: &str = "ATELIER_SEED";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    LogFormat {
        var: &'static str,
        #[source]
        source: UnknownLogFormat,
    },

    #[error("{var} is set but empty")]
    EmptyPath { var: &'static str },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardConfig {
    pub log_format: LogFormat,
    pub search: String,
    /// Seed file replacing the built-in sample data.
    pub seed_path: Option<PathBuf>,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse().map_err(|source| ConfigError::LogFormat {
                var: LOG_FORMAT_VAR,
                source,
            })?,
            None => LogFormat::default(),
        };

        let search = lookup(SEARCH_VAR).unwrap_or_default();

        let seed_path = match lookup(SEED_VAR) {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::EmptyPath { var: SEED_VAR });
            }
            Some(raw) => Some(PathBuf::from(raw)),
            None => None,
        };

        Ok(Self {
            log_format,
            search,
            seed_path,
        })
    }
}
