//! Integration tests for configuration loading and resolution
//!
//! Covers:
//! - Priority order: CLI path, environment variable, platform config dir, defaults
//! - Graceful fallback to defaults when no config file exists
//! - Explicit config paths that cannot be read are errors
//! - Atomic TOML writes that round-trip through the loader
//!
//! Note: Uses serial_test to prevent environment variable race conditions.
//! Tests that manipulate TRACENEURO_CONFIG are marked with #[serial].

use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;
use traceneuro_common::config::{
    load_toml_config, write_toml_config, ConfigResolver, ConfigSource, LoggingConfig, TomlConfig,
    CONFIG_ENV_VAR,
};
use traceneuro_common::params::{Marker, ScoringConfig, DEFAULT_WEIGHTS};
use traceneuro_common::Error;

#[test]
#[serial]
fn test_env_var_used_when_no_cli_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("from_env.toml");
    std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

    env::set_var(CONFIG_ENV_VAR, &path);

    let resolver = ConfigResolver::new(None);
    let (resolved, source) = resolver.resolve().unwrap();
    assert_eq!(resolved, path);
    assert_eq!(source, ConfigSource::Environment);

    let config = resolver.load().unwrap();
    assert_eq!(config.logging.level, "warn");

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_cli_path_beats_env_var() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/traceneuro-should-not-be-used.toml");

    let resolver = ConfigResolver::new(Some(PathBuf::from("/tmp/traceneuro-cli.toml")));
    let (resolved, source) = resolver.resolve().unwrap();
    assert_eq!(resolved, PathBuf::from("/tmp/traceneuro-cli.toml"));
    assert_eq!(source, ConfigSource::CommandLine);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    env::set_var(CONFIG_ENV_VAR, "/nonexistent/traceneuro/config.toml");

    let resolver = ConfigResolver::new(None);
    let err = resolver.load().unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {:?}", err);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_invalid_weights_in_file_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "[scoring.weights]\ncoherence = 0.75\n").unwrap();

    let resolver = ConfigResolver::new(Some(path));
    let err = resolver.load().unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {:?}", err);
}

#[test]
fn test_write_then_load_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("nested").join("config.toml");

    let config = TomlConfig {
        logging: LoggingConfig {
            level: "debug".to_string(),
            file: None,
        },
        scoring: ScoringConfig {
            min_sentence_length: 4,
            parallel: false,
            weights: DEFAULT_WEIGHTS
                .with_weight(Marker::Drift, 0.25)
                .with_weight(Marker::Stylometry, 0.15),
            ..ScoringConfig::default()
        },
    };

    write_toml_config(&config, &target).unwrap();

    assert!(target.exists());
    assert!(!target.with_extension("toml.tmp").exists());

    let loaded = load_toml_config(&target).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_written_file_is_human_readable() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("config.toml");

    write_toml_config(&TomlConfig::default(), &target).unwrap();

    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.contains("[logging]"));
    assert!(content.contains("level = \"info\""));
    assert!(content.contains("stylometry = 0.2"));
}
