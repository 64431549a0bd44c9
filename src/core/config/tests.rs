use super::data::{Config, ConfigKeyError, DEFAULT_BASE_URL};
use super::io::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    assert_eq!(config.request_timeout(), None);
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config
        .set_key("base-url", "http://127.0.0.1:9000")
        .expect("set base-url");
    config.set_key("request-timeout", "30").expect("set timeout");
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded.base_url(), "http://127.0.0.1:9000");
    assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(30)));

    let mut loaded = loaded;
    loaded.unset_key("base-url").expect("unset base-url");
    loaded
        .save_to_path(&config_path)
        .expect("Failed to save modified config");
    let reloaded = Config::load_from_path(&config_path).expect("Failed to reload config");
    assert_eq!(reloaded.base_url(), DEFAULT_BASE_URL);
    assert_eq!(reloaded.request_timeout_secs, Some(30));
}

#[test]
fn invalid_toml_reports_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "base_url = [").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn set_key_validates_values() {
    let mut config = Config::default();

    assert_eq!(
        config.set_key("request-timeout", "soon"),
        Err(ConfigKeyError::InvalidValue {
            key: "request-timeout",
            value: "soon".to_string()
        })
    );
    assert!(matches!(
        config.set_key("base-url", "not a url"),
        Err(ConfigKeyError::InvalidValue { .. })
    ));
    assert_eq!(
        config.set_key("theme", "dark"),
        Err(ConfigKeyError::UnknownKey("theme".to_string()))
    );
    assert_eq!(config, Config::default());
}

#[test]
fn zero_timeout_means_no_timeout() {
    let config = Config {
        request_timeout_secs: Some(0),
        ..Default::default()
    };
    assert_eq!(config.request_timeout(), None);
}

#[test]
fn data_dir_override_controls_settings_store() {
    let config = Config {
        data_dir: Some(PathBuf::from("/tmp/gpteng-data")),
        ..Default::default()
    };
    let store = config.settings_store().expect("store");
    assert_eq!(store.dir(), PathBuf::from("/tmp/gpteng-data").as_path());
}
