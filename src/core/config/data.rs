use crate::core::store::FileStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Backend root, e.g. `http://localhost:8000`
    pub base_url: Option<String>,
    /// Page URL the front-end was opened with; its `gpteng_path` query
    /// parameter seeds the settings cache.
    pub launch_url: Option<String>,
    /// Per-request timeout. Requests never time out when unset.
    pub request_timeout_secs: Option<u64>,
    /// Directory holding the persisted settings cache
    pub data_dir: Option<PathBuf>,
}

/// Keys accepted by `gpteng config set` / `unset`.
pub const CONFIG_KEYS: &[&str] = &["base-url", "launch-url", "request-timeout", "data-dir"];

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigKeyError {
    UnknownKey(String),
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKeyError::UnknownKey(key) => {
                write!(f, "Unknown config key: {key} (known: {})", CONFIG_KEYS.join(", "))
            }
            ConfigKeyError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {key}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigKeyError {}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Store for the settings cache; `None` when no data directory can be
    /// determined for this platform.
    pub fn settings_store(&self) -> Option<FileStore> {
        match &self.data_dir {
            Some(dir) => Some(FileStore::new(dir)),
            None => FileStore::default_location(),
        }
    }

    pub fn set_key(&mut self, key: &str, value: &str) -> Result<(), ConfigKeyError> {
        match key {
            "base-url" => {
                if reqwest::Url::parse(value).is_err() {
                    return Err(ConfigKeyError::InvalidValue {
                        key: "base-url",
                        value: value.to_string(),
                    });
                }
                self.base_url = Some(value.to_string());
            }
            "launch-url" => self.launch_url = Some(value.to_string()),
            "request-timeout" => {
                let secs = value
                    .parse::<u64>()
                    .map_err(|_| ConfigKeyError::InvalidValue {
                        key: "request-timeout",
                        value: value.to_string(),
                    })?;
                self.request_timeout_secs = Some(secs);
            }
            "data-dir" => self.data_dir = Some(PathBuf::from(value)),
            other => return Err(ConfigKeyError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn unset_key(&mut self, key: &str) -> Result<(), ConfigKeyError> {
        match key {
            "base-url" => self.base_url = None,
            "launch-url" => self.launch_url = None,
            "request-timeout" => self.request_timeout_secs = None,
            "data-dir" => self.data_dir = None,
            other => return Err(ConfigKeyError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
