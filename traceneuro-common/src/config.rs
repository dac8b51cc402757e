//! Configuration loading and config file resolution

use crate::params::ScoringConfig;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TRACENEURO_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Logging configuration (optional)
    pub logging: LoggingConfig,

    /// Scoring parameters (optional, every field defaulted)
    pub scoring: ScoringConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where a resolved config path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine,
    Environment,
    UserConfigDir,
}

impl ConfigSource {
    /// Explicitly named files must exist; the platform default may be absent
    pub fn is_explicit(&self) -> bool {
        !matches!(self, ConfigSource::UserConfigDir)
    }
}

/// Config file resolution following priority order:
/// 1. Command-line argument (highest priority)
/// 2. `TRACENEURO_CONFIG` environment variable
/// 3. `<config_dir>/traceneuro/config.toml` if it exists
/// 4. Compiled defaults (no file)
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Resolve the config file path, or `None` when compiled defaults apply
    pub fn resolve(&self) -> Option<(PathBuf, ConfigSource)> {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_path {
            return Some((path.clone(), ConfigSource::CommandLine));
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some((PathBuf::from(path), ConfigSource::Environment));
            }
        }

        // Priority 3: Platform config directory
        if let Some(path) = default_config_path() {
            if path.exists() {
                return Some((path, ConfigSource::UserConfigDir));
            }
        }

        // Priority 4: Compiled defaults
        None
    }

    /// Resolve and load the configuration
    ///
    /// An explicitly named file that cannot be read or parsed is an error.
    /// With no file at all, compiled defaults are used.
    pub fn load(&self) -> Result<TomlConfig> {
        match self.resolve() {
            Some((path, source)) => {
                debug!("Loading config from {} ({:?})", path.display(), source);
                match load_toml_config(&path) {
                    Ok(config) => {
                        info!("Configuration loaded from {}", path.display());
                        Ok(config)
                    }
                    Err(Error::Io(e)) if !source.is_explicit() => {
                        warn!(
                            "Config file {} unreadable ({}), using defaults",
                            path.display(),
                            e
                        );
                        Ok(TomlConfig::default())
                    }
                    Err(e) => Err(e),
                }
            }
            None => {
                debug!("No config file found, using compiled defaults");
                Ok(TomlConfig::default())
            }
        }
    }
}

/// Platform config file location (`~/.config/traceneuro/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("traceneuro").join("config.toml"))
}

/// Read, parse, and validate a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_toml_config(&content)
}

/// Parse and validate a TOML config document
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    let config: TomlConfig = toml::from_str(content)?;
    config.scoring.validate()?;
    Ok(config)
}

/// Render a config as a human-readable TOML document
pub fn render_toml_config(config: &TomlConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

/// Write config atomically (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, target: &Path) -> Result<()> {
    let rendered = render_toml_config(config)?;

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = target.with_extension("toml.tmp");
    std::fs::write(&temp_path, rendered)?;
    if let Err(e) = std::fs::rename(&temp_path, target) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(Error::Io(e));
    }

    Ok(())
}
