//! Error types for traceneuro-engine
//!
//! Input validation failures are raised before the pipeline runs. Analyzer
//! computations are total; a non-finite marker score is reported as
//! `InternalComputation` and treated as a bug, never retried or defaulted.

use thiserror::Error;

/// Scoring error type
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Text rejected before entering the pipeline
    #[error("Invalid input: {0}")]
    Input(String),

    /// Scoring configuration failed validation
    #[error("Invalid scoring configuration: {0}")]
    Config(String),

    /// A lexicon pattern failed to compile
    #[error("Pattern compilation failed: {0}")]
    Pattern(#[from] regex::Error),

    /// An analyzer produced a value it cannot normalize
    #[error("Internal computation error in {marker}: {message}")]
    InternalComputation { marker: String, message: String },

    /// traceneuro-common error
    #[error("Common error: {0}")]
    Common(#[from] traceneuro_common::Error),
}

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, ScoreError>;
