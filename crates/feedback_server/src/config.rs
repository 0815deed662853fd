use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use feedback_core::default_log_level;
use log::info;
use thiserror::Error;

const MEMORY_DB: &str = ":memory:";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value `{value}`: {reason}")]
    InvalidVar {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

impl Display for DbLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => write!(f, "{MEMORY_DB}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub db: DbLocation,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or blank keys use defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db = match var("FEEDBACK_DB_PATH") {
            Some(path) if path.trim() == MEMORY_DB => DbLocation::Memory,
            Some(path) => DbLocation::File(PathBuf::from(path.trim())),
            None => DbLocation::File(PathBuf::from("feedback.sqlite3")),
        };

        Ok(Self {
            port: parse_var("FEEDBACK_PORT", var("FEEDBACK_PORT"), 3000)?,
            db,
            log_level: var("FEEDBACK_LOG_LEVEL")
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: var("FEEDBACK_LOG_DIR"),
        })
    }

    pub fn address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn log_summary(&self) {
        info!(
            "event=config_loaded module=config status=ok port={} db={} log_level={} log_dir={}",
            self.port,
            self.db,
            self.log_level,
            self.log_dir.as_deref().unwrap_or("stderr")
        );
    }
}

fn parse_var<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = raw else {
        return Ok(default);
    };

    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidVar {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}
