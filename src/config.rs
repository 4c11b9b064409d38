use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::log_query::FilterMode;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("LOG_FILTER_MODE must be \"both\" or \"either\", got {0:?}")]
    InvalidFilterMode(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub filter_mode: FilterMode,
    pub public_dir: PathBuf,
    pub views_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let filter_mode = match lookup("LOG_FILTER_MODE") {
            Some(raw) => {
                FilterMode::parse(&raw).ok_or_else(|| ConfigError::InvalidFilterMode(raw))?
            }
            None => FilterMode::default(),
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:exercise_tracker.db?mode=rwc".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
            filter_mode,
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            views_dir: lookup("VIEWS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("views")),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
