//! Logging setup for the `traceneuro` front end
//!
//! The configured subscriber depends on the configuration file, so the file
//! is resolved and loaded under a short-lived bootstrap subscriber first.

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use traceneuro_common::config::{ConfigResolver, TomlConfig};

/// Crates whose events are shown when RUST_LOG is unset
const LOG_TARGETS: &[&str] = &["traceneuro", "traceneuro_engine", "traceneuro_common"];

/// Level used until the configured one is known
pub const BOOTSTRAP_LEVEL: &str = "info";

/// RUST_LOG wins; otherwise `level` applies to every traceneuro crate
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect();
        EnvFilter::new(directives.join(","))
    })
}

/// Stderr subscriber used while the configuration is being resolved
pub fn bootstrap_subscriber() -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(BOOTSTRAP_LEVEL))
        .with_writer(std::io::stderr)
        .finish()
}

/// Load the configuration with `subscriber` as the scoped default dispatcher
pub fn load_config<S>(
    resolver: &ConfigResolver,
    subscriber: S,
) -> traceneuro_common::Result<TomlConfig>
where
    S: Subscriber + Send + Sync + 'static,
{
    tracing::subscriber::with_default(subscriber, || resolver.load())
}
