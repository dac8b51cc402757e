//! # TraceNeuro Common Library
//!
//! Shared code for the TraceNeuro scoring engine and its front ends:
//! - Marker identifiers and default fusion weights
//! - Scoring parameters and their validation
//! - TOML configuration loading and resolution
//! - Input hashing

pub mod config;
pub mod error;
pub mod hashing;
pub mod params;

pub use error::{Error, Result};
pub use hashing::text_hash;
pub use params::{Marker, MarkerWeights, ScoringConfig, DEFAULT_WEIGHTS};
