//! Cached project settings and their bootstrap sequence.

use crate::core::store::{SettingsStore, StoreError};
use crate::utils::url::query_param;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Storage key for the persisted settings blob.
pub const SETTINGS_STORAGE_KEY: &str = "API_SETTINGS";

/// Settings key (and query parameter name) carrying the project path token.
pub const PATH_KEY: &str = "gpteng_path";

/// Opaque backend configuration.
///
/// Only [`PATH_KEY`] is interpreted by the client; every other key is carried
/// through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(pub Map<String, Value>);

impl Settings {
    pub fn with_path(path: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert(PATH_KEY.to_string(), Value::String(path.into()));
        Self(map)
    }

    /// Interpret a response body as settings. Only JSON objects qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned().map(Self)
    }

    pub fn gpteng_path(&self) -> Option<&str> {
        self.0.get(PATH_KEY).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// Where the currently cached settings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSource {
    QueryString,
    PersistedCache,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SettingsState {
    /// Nothing cached; requests carry `gpteng_path=undefined`.
    #[default]
    Unset,
    /// Seeded at startup, not yet confirmed by the backend.
    Bootstrapped {
        settings: Settings,
        source: SettingsSource,
    },
    /// Refreshed by a successful `settings.read` round-trip.
    Loaded(Settings),
}

impl SettingsState {
    pub fn settings(&self) -> Option<&Settings> {
        match self {
            SettingsState::Unset => None,
            SettingsState::Bootstrapped { settings, .. } => Some(settings),
            SettingsState::Loaded(settings) => Some(settings),
        }
    }

    pub fn gpteng_path(&self) -> Option<&str> {
        self.settings().and_then(Settings::gpteng_path)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SettingsState::Loaded(_))
    }

    /// Seed state from the launch URL's query string, falling back to the
    /// persisted cache.
    ///
    /// A corrupt or unreadable cache leaves the state unset rather than
    /// failing client construction.
    pub fn bootstrap(launch_url: Option<&str>, store: &dyn SettingsStore) -> Self {
        if let Some(path) = launch_url.and_then(|url| query_param(url, PATH_KEY)) {
            debug!(gpteng_path = %path, "settings seeded from launch url");
            return SettingsState::Bootstrapped {
                settings: Settings::with_path(path),
                source: SettingsSource::QueryString,
            };
        }

        match read_persisted(store) {
            Ok(Some(settings)) => {
                debug!("settings seeded from persisted cache");
                SettingsState::Bootstrapped {
                    settings,
                    source: SettingsSource::PersistedCache,
                }
            }
            Ok(None) => SettingsState::Unset,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable settings cache");
                SettingsState::Unset
            }
        }
    }
}

fn read_persisted(store: &dyn SettingsStore) -> Result<Option<Settings>, StoreError> {
    let Some(raw) = store.get(SETTINGS_STORAGE_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Ok(Settings::from_value(&value)),
        Err(err) => {
            warn!(error = %err, "persisted settings are not valid JSON");
            Ok(None)
        }
    }
}

pub fn persist(store: &dyn SettingsStore, settings: &Settings) -> Result<(), StoreError> {
    let value = settings.to_value().to_string();
    store.set(SETTINGS_STORAGE_KEY, &value)
}
