use crate::error::{AppResult, ConfigErrorKind, InventoryError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_SNAPSHOT: &str = "inventory.json";
const DEFAULT_LIST_LIMIT: usize = 50;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub snapshot_path: PathBuf,     // e.g. "inventory.json"
    pub main_character: Option<String>,
    pub list_limit: usize,          // rows shown by `list` unless overridden
    pub log_filter: String,         // e.g. "deeppockets=debug"
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT),
            main_character: None,
            list_limit: DEFAULT_LIST_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| InventoryError::Config {
            path: path.to_path_buf(),
            source: ConfigErrorKind::Read(e),
        })?;
        Self::parse(&data).map_err(|e| InventoryError::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn parse(data: &str) -> Result<Self, ConfigErrorKind> {
        toml::from_str(data).map_err(ConfigErrorKind::Parse)
    }

    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::from_filename(".env");
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut cfg = Self::default();

        if let Some(path) = var("DEEPPOCKETS_SNAPSHOT") {
            cfg.snapshot_path = PathBuf::from(path);
        }
        cfg.main_character = var("DEEPPOCKETS_MAIN").filter(|s| !s.trim().is_empty());
        if let Some(limit) = var("DEEPPOCKETS_LIST_LIMIT") {
            cfg.list_limit = limit.parse().map_err(|_| InventoryError::Config {
                path: PathBuf::from(".env"),
                source: ConfigErrorKind::InvalidEnv("DEEPPOCKETS_LIST_LIMIT".to_string(), limit.clone()),
            })?;
        }
        if let Some(filter) = var("DEEPPOCKETS_LOG") {
            cfg.log_filter = filter;
        }

        Ok(cfg)
    }
}
