//! traceneuro-engine library interface
//!
//! Marker-fusion scoring pipeline: normalize and segment text, run the six
//! marker analyzers, and fuse their scores into a HumanScore with a
//! per-marker breakdown. The pipeline is pure: no I/O and no shared mutable
//! state, so one [`Scorer`] can serve any number of threads.

pub mod encoder;
pub mod error;
pub mod fusion;
pub mod logging;
pub mod markers;
pub mod preprocessing;
pub mod types;

pub use crate::encoder::FeatureEncoder;
pub use crate::error::{Result, ScoreError};
pub use crate::fusion::FusionEngine;
pub use crate::preprocessing::TextProcessor;
pub use crate::types::{MarkerResult, MetricValue, ProcessedText, ScoreResult, TextView};
pub use traceneuro_common::{Marker, MarkerWeights, ScoringConfig, DEFAULT_WEIGHTS};

/// Reusable scoring entry point: input validation, preprocessing, and fusion
pub struct Scorer {
    min_input_length: usize,
    processor: TextProcessor,
    engine: FusionEngine,
}

impl Scorer {
    pub fn new(config: &ScoringConfig) -> Result<Self> {
        let engine = FusionEngine::new(config)?;
        Ok(Self {
            min_input_length: config.min_input_length,
            processor: TextProcessor::from_config(config)?,
            engine,
        })
    }

    pub fn engine(&self) -> &FusionEngine {
        &self.engine
    }

    pub fn processor(&self) -> &TextProcessor {
        &self.processor
    }

    /// Reject text that is empty or shorter than the configured minimum
    pub fn validate_input(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(ScoreError::Input("text must not be empty".to_string()));
        }

        let length = text.chars().count();
        if length < self.min_input_length {
            return Err(ScoreError::Input(format!(
                "text must be at least {} characters, got {}",
                self.min_input_length, length
            )));
        }

        Ok(())
    }

    pub fn score(&self, text: &str) -> Result<ScoreResult> {
        self.validate_input(text)?;
        let processed = self.processor.process(text);
        self.engine.score(&processed)
    }
}

/// Score one text under the given configuration
pub fn score_text(text: &str, config: &ScoringConfig) -> Result<ScoreResult> {
    Scorer::new(config)?.score(text)
}
