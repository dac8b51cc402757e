//! Logging during configuration loading
//!
//! The resolver runs before the configured subscriber exists; its events
//! must reach the subscriber passed to `load_config`.

mod helpers;

use helpers::LogCapture;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use traceneuro_common::config::{write_toml_config, ConfigResolver, TomlConfig};
use traceneuro_engine::logging::load_config;

#[test]
fn test_config_load_is_logged_before_tracing_init() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("traceneuro.toml");
    let mut written = TomlConfig::default();
    written.logging.level = "debug".to_string();
    write_toml_config(&written, &path).unwrap();

    let capture = LogCapture::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let config = load_config(&ConfigResolver::new(Some(path.clone())), subscriber).unwrap();

    assert_eq!(config.logging.level, "debug");
    let loaded = capture.matching_at(Level::INFO, "Configuration loaded from");
    assert_eq!(loaded.len(), 1);
    assert!(loaded[0].message.contains(&path.display().to_string()));
    assert_eq!(loaded[0].target, "traceneuro_common::config");
}

#[test]
fn test_missing_explicit_config_fails_under_bootstrap() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.toml");

    let capture = LogCapture::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let result = load_config(&ConfigResolver::new(Some(path)), subscriber);

    assert!(result.is_err());
    assert!(!capture.contains("Configuration loaded from"));
}
