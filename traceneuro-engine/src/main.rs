//! traceneuro - HumanScore command-line front end
//!
//! Thin caller of the scoring library: resolves configuration, reads text
//! from a file or stdin, and prints the scored result as JSON on stdout.
//! Logs go to stderr (or the configured log file).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use traceneuro_common::config::{
    render_toml_config, write_toml_config, ConfigResolver, LoggingConfig, TomlConfig,
};
use traceneuro_common::text_hash;
use traceneuro_engine::logging::{bootstrap_subscriber, env_filter, load_config};
use traceneuro_engine::{ScoreResult, Scorer};

#[derive(Parser, Debug)]
#[command(name = "traceneuro")]
#[command(about = "Score how human-like a piece of text reads")]
#[command(version)]
struct Args {
    /// Config file (overrides TRACENEURO_CONFIG and the platform default)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score text from FILE, or stdin when FILE is omitted
    Score {
        file: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Run the analyzers one after another instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Write the configuration to PATH instead of printing it
        #[arg(long, value_name = "PATH")]
        write: Option<PathBuf>,
    },
}

/// JSON document printed by `traceneuro score`
#[derive(Serialize)]
struct ScoreReport<'a> {
    input_hash: String,
    scored_at: DateTime<Utc>,
    result: &'a ScoreResult,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Resolver logs go to stderr until the configured subscriber is installed
    let resolver = ConfigResolver::new(args.config.clone());
    let config = load_config(&resolver, bootstrap_subscriber())
        .context("Failed to load configuration")?;

    init_tracing(&config.logging)?;

    info!(
        "Starting traceneuro v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match args.command {
        Command::Score {
            file,
            pretty,
            sequential,
        } => run_score(config, file, pretty, sequential),
        Command::Config { write } => run_config(&config, write),
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = env_filter(&logging.level);

    let file_layer = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = file_layer
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

fn run_score(
    config: TomlConfig,
    file: Option<PathBuf>,
    pretty: bool,
    sequential: bool,
) -> Result<()> {
    let mut scoring = config.scoring;
    if sequential {
        scoring.parallel = false;
    }

    let text = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let scorer = Scorer::new(&scoring)?;
    let result = scorer.score(&text)?;

    let report = ScoreReport {
        input_hash: text_hash(&text),
        scored_at: Utc::now(),
        result: &result,
    };

    let output = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    Ok(())
}

fn run_config(config: &TomlConfig, write: Option<PathBuf>) -> Result<()> {
    match write {
        Some(path) => {
            write_toml_config(config, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Configuration written to {}", path.display());
        }
        None => print!("{}", render_toml_config(config)?),
    }
    Ok(())
}
