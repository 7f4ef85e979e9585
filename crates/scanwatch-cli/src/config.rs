//! Configuration file support for scanwatch.
//!
//! Supports TOML configuration from:
//! - User config: `~/.config/scanwatch/config.toml` (lowest priority)
//! - Project-local: `.scanwatch.toml` (searched up directory tree)
//! - `SCANWATCH_*` environment variables and CLI flags (highest priority,
//!   applied in [`AppConfig::resolve`])

use std::path::{Path, PathBuf};
use std::time::Duration;

use scanwatch_core::client::{ApiConfig, DEFAULT_TIMEOUT};
use scanwatch_core::watcher::WatchOptions;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service root used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

const PROJECT_CONFIG_NAME: &str = ".scanwatch.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend connection.
    pub api: ApiSection,
    /// Polling cadence for `watch`.
    pub watch: WatchSection,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct WatchSection {
    pub interval_ms: Option<u64>,
    pub max_interval_ms: Option<u64>,
    pub max_consecutive_errors: Option<u32>,
}

/// Values supplied on the command line (or their `SCANWATCH_*` env vars).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub interval_ms: Option<u64>,
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub watch: WatchOptions,
}

impl AppConfig {
    /// Load configuration from the user and project-local files.
    ///
    /// Missing files are silently ignored; unreadable or malformed ones are
    /// errors.
    pub fn load() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().ok();
        Self::load_from(user_config_path(), cwd.as_deref())
    }

    /// Load with explicit locations. `start_dir` is where the project-local
    /// search begins.
    pub fn load_from(
        user_path: Option<PathBuf>,
        start_dir: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = user_path {
            if path.exists() {
                info!("Loading user config: {}", path.display());
                config = load_file(&path)?;
            } else {
                debug!("User config not found: {}", path.display());
            }
        }

        if let Some(path) = start_dir.and_then(find_config_in_parents) {
            info!("Loading project config: {}", path.display());
            config.merge(load_file(&path)?);
        }

        Ok(config)
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.api.base_url = other.api.base_url.or_else(|| self.api.base_url.take());
        self.api.timeout_secs = other.api.timeout_secs.or(self.api.timeout_secs);

        self.watch.interval_ms = other.watch.interval_ms.or(self.watch.interval_ms);
        self.watch.max_interval_ms = other.watch.max_interval_ms.or(self.watch.max_interval_ms);
        self.watch.max_consecutive_errors = other
            .watch
            .max_consecutive_errors
            .or(self.watch.max_consecutive_errors);
    }

    /// Apply overrides, fill defaults, and validate.
    pub fn resolve(&self, overrides: &Overrides) -> Result<Settings, ConfigError> {
        let defaults = WatchOptions::default();

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| self.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let timeout = overrides
            .timeout_secs
            .or(self.api.timeout_secs)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        let interval = overrides
            .interval_ms
            .or(self.watch.interval_ms)
            .map_or(defaults.interval, Duration::from_millis);
        let max_interval = self
            .watch
            .max_interval_ms
            .map_or(defaults.max_interval, Duration::from_millis)
            .max(interval);
        let max_consecutive_errors = self
            .watch
            .max_consecutive_errors
            .unwrap_or(defaults.max_consecutive_errors);

        if base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".into()));
        }
        if timeout.is_zero() {
            return Err(ConfigError::Invalid("api.timeout_secs must be positive".into()));
        }
        if interval.is_zero() {
            return Err(ConfigError::Invalid("watch.interval_ms must be positive".into()));
        }
        if max_consecutive_errors == 0 {
            return Err(ConfigError::Invalid(
                "watch.max_consecutive_errors must be at least 1".into(),
            ));
        }
        if self.watch.max_interval_ms.is_some_and(|ms| Duration::from_millis(ms) < interval) {
            warn!("watch.max_interval_ms is below the poll interval; using the interval");
        }

        Ok(Settings {
            api: ApiConfig { base_url, timeout },
            watch: WatchOptions {
                interval,
                max_interval,
                max_consecutive_errors,
            },
        })
    }
}

fn load_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Get the user config file path.
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("scanwatch").join("config.toml"))
}

/// Search for `.scanwatch.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_NAME))
        .find(|candidate| candidate.is_file())
}
