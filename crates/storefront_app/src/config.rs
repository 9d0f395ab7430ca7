use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use engine_logging::{engine_info, LevelFilter, LogDestination};
use listing_core::ContinuationMode;
use listing_engine::FetchSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILENAME: &str = "storefront.ron";
pub const BASE_URL_ENV: &str = "LISTINGS_API_BASE_URL";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum ModeSetting {
    #[default]
    Scroll,
    Paged,
}

impl From<ModeSetting> for ContinuationMode {
    fn from(mode: ModeSetting) -> Self {
        match mode {
            ModeSetting::Scroll => ContinuationMode::InfiniteScroll,
            ModeSetting::Paged => ContinuationMode::Paged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

/// Settings read from `storefront.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub mode: ModeSetting,
    pub viewport_width: u32,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogTarget,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            mode: ModeSetting::default(),
            viewport_width: 1280,
            connect_timeout_ms: fetch.connect_timeout.as_millis() as u64,
            request_timeout_ms: fetch.request_timeout.as_millis() as u64,
            max_response_bytes: fetch.max_bytes,
            log_destination: LogTarget::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_response_bytes,
            ..FetchSettings::default()
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Replaces the base URL from `LISTINGS_API_BASE_URL` when it is set.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            self.set_base_url(&url);
        }
    }

    /// Stores `url` with the trailing `/` that relative requests rely on.
    pub fn set_base_url(&mut self, url: &str) {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return;
        }
        self.api_base_url = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
    }
}

/// Where the loaded settings came from. Reported once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The file was absent.
    Defaults(PathBuf),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => engine_info!("Loaded config from {:?}", path),
            ConfigSource::Defaults(path) => {
                engine_info!("No config at {:?}; using defaults", path)
            }
        }
    }
}

/// Loads `path`, falling back to defaults when the file does not exist.
pub fn load_config(path: &Path) -> Result<(AppConfig, ConfigSource), ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok((
                AppConfig::default(),
                ConfigSource::Defaults(path.to_path_buf()),
            ));
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut config: AppConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let base_url = config.api_base_url.clone();
    config.set_base_url(&base_url);
    Ok((config, ConfigSource::File(path.to_path_buf())))
}
