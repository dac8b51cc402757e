//! Scoring parameters
//!
//! Marker identifiers, fusion weights, and the per-request scoring
//! configuration. The default weights are a process-wide constant; a request
//! that overrides them gets its own `MarkerWeights` value and the constant is
//! never touched.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance used when checking that the fusion weights sum to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Default fusion weights
///
/// drift 0.20, cadence 0.15, hedging 0.15, metaphor 0.10, coherence 0.20,
/// stylometry 0.20 (sum 1.0)
pub const DEFAULT_WEIGHTS: MarkerWeights = MarkerWeights {
    drift: 0.20,
    cadence: 0.15,
    hedging: 0.15,
    metaphor: 0.10,
    coherence: 0.20,
    stylometry: 0.20,
};

/// One of the six heuristic signal categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Drift,
    Cadence,
    Hedging,
    Metaphor,
    Coherence,
    Stylometry,
}

impl Marker {
    /// All markers in fusion order
    pub const ALL: [Marker; 6] = [
        Marker::Drift,
        Marker::Cadence,
        Marker::Hedging,
        Marker::Metaphor,
        Marker::Coherence,
        Marker::Stylometry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::Drift => "drift",
            Marker::Cadence => "cadence",
            Marker::Hedging => "hedging",
            Marker::Metaphor => "metaphor",
            Marker::Coherence => "coherence",
            Marker::Stylometry => "stylometry",
        }
    }

    /// Name of the designated scalar score inside this marker's result map
    pub fn score_key(&self) -> &'static str {
        match self {
            Marker::Drift => "drift_score",
            Marker::Cadence => "cadence_score",
            Marker::Hedging => "hedging_score",
            Marker::Metaphor => "metaphor_score",
            Marker::Coherence => "coherence_score",
            Marker::Stylometry => "stylometry_score",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fusion weight per marker
///
/// Deserializes with per-field defaults, so a TOML table that names only
/// some markers keeps the default weight for the rest. The result must still
/// pass [`MarkerWeights::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerWeights {
    pub drift: f64,
    pub cadence: f64,
    pub hedging: f64,
    pub metaphor: f64,
    pub coherence: f64,
    pub stylometry: f64,
}

impl Default for MarkerWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl MarkerWeights {
    pub fn weight(&self, marker: Marker) -> f64 {
        match marker {
            Marker::Drift => self.drift,
            Marker::Cadence => self.cadence,
            Marker::Hedging => self.hedging,
            Marker::Metaphor => self.metaphor,
            Marker::Coherence => self.coherence,
            Marker::Stylometry => self.stylometry,
        }
    }

    /// Copy of these weights with one marker replaced
    pub fn with_weight(mut self, marker: Marker, weight: f64) -> Self {
        let slot = match marker {
            Marker::Drift => &mut self.drift,
            Marker::Cadence => &mut self.cadence,
            Marker::Hedging => &mut self.hedging,
            Marker::Metaphor => &mut self.metaphor,
            Marker::Coherence => &mut self.coherence,
            Marker::Stylometry => &mut self.stylometry,
        };
        *slot = weight;
        self
    }

    pub fn sum(&self) -> f64 {
        Marker::ALL.iter().map(|m| self.weight(*m)).sum()
    }

    /// Reject negative or non-finite weights and sets that do not sum to 1.0
    ///
    /// Weights are never renormalized.
    pub fn validate(&self) -> Result<()> {
        for marker in Marker::ALL {
            let w = self.weight(marker);
            if !w.is_finite() || w < 0.0 {
                return Err(Error::Config(format!(
                    "weight for {} must be a non-negative number, got {}",
                    marker, w
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::Config(format!(
                "marker weights must sum to 1.0, got {:.6}",
                sum
            )));
        }

        Ok(())
    }
}

/// Per-request scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Shortest sentence kept by segmentation, in characters
    ///
    /// Default: 3
    pub min_sentence_length: usize,

    /// Longest sentence kept by segmentation, in characters
    ///
    /// Default: 500
    pub max_sentence_length: usize,

    /// Minimum raw input length accepted by the scoring entry point
    ///
    /// Default: 10 characters
    pub min_input_length: usize,

    /// Run the six analyzers on the rayon pool instead of sequentially
    ///
    /// Default: true. Both modes produce identical results.
    pub parallel: bool,

    /// Fusion weights (default: [`DEFAULT_WEIGHTS`])
    pub weights: MarkerWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_sentence_length: 3,
            max_sentence_length: 500,
            min_input_length: 10,
            parallel: true,
            weights: DEFAULT_WEIGHTS,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        if self.min_sentence_length == 0 {
            return Err(Error::Config(
                "min_sentence_length must be at least 1".to_string(),
            ));
        }
        if self.min_sentence_length > self.max_sentence_length {
            return Err(Error::Config(format!(
                "min_sentence_length ({}) exceeds max_sentence_length ({})",
                self.min_sentence_length, self.max_sentence_length
            )));
        }

        Ok(())
    }
}
