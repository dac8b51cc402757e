//! Fusion Engine
//!
//! Fans the processed text out to the six marker analyzers, clamps each
//! designated score to `[0, 1]`, and reduces them to the HumanScore with a
//! fixed weighted sum.
//!
//! Analyzers only ever see a borrowed [`TextView`], so the fan-out can run on
//! the rayon pool or sequentially with identical results.

use crate::error::{Result, ScoreError};
use crate::markers::{
    CadenceAnalyzer, CoherenceAnalyzer, DriftAnalyzer, HedgingDetector, MarkerAnalyzer,
    MetaphorCounter, StylometricExtractor,
};
use crate::types::{MarkerResult, ProcessedText, ScoreMetadata, ScoreResult, TextView};
use std::collections::BTreeMap;
use tracing::{debug, info};
use traceneuro_common::{Marker, MarkerWeights, ScoringConfig};

/// Decimal places kept in the HumanScore and breakdown
pub const SCORE_DECIMALS: usize = 4;

/// Round to [`SCORE_DECIMALS`] places from the exact binary value
///
/// Decimal formatting rounds the exact value, so 0.56875, stored as
/// 0.568749999..., becomes 0.5687.
pub fn round_score(value: f64) -> f64 {
    format!("{:.*}", SCORE_DECIMALS, value)
        .parse()
        .unwrap_or(value)
}

pub struct FusionEngine {
    weights: MarkerWeights,
    parallel: bool,
    drift: DriftAnalyzer,
    cadence: CadenceAnalyzer,
    hedging: HedgingDetector,
    metaphor: MetaphorCounter,
    coherence: CoherenceAnalyzer,
    stylometry: StylometricExtractor,
}

impl FusionEngine {
    /// Build the engine, compiling every analyzer's pattern set once
    pub fn new(config: &ScoringConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ScoreError::Config(e.to_string()))?;

        Ok(Self {
            weights: config.weights,
            parallel: config.parallel,
            drift: DriftAnalyzer::new(),
            cadence: CadenceAnalyzer::new(),
            hedging: HedgingDetector::new()?,
            metaphor: MetaphorCounter::new()?,
            coherence: CoherenceAnalyzer::new()?,
            stylometry: StylometricExtractor::new()?,
        })
    }

    pub fn weights(&self) -> &MarkerWeights {
        &self.weights
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Analyzers in fusion order
    pub fn analyzers(&self) -> [&dyn MarkerAnalyzer; 6] {
        [
            &self.drift,
            &self.cadence,
            &self.hedging,
            &self.metaphor,
            &self.coherence,
            &self.stylometry,
        ]
    }

    /// Run every analyzer over the view and collect the results in fusion order
    pub fn analyze(&self, view: &TextView<'_>) -> Vec<MarkerResult> {
        if !self.parallel {
            return self.analyzers().iter().map(|a| a.analyze(view)).collect();
        }

        let (((drift, cadence), hedging), ((metaphor, coherence), stylometry)) = rayon::join(
            || {
                rayon::join(
                    || rayon::join(|| self.drift.analyze(view), || self.cadence.analyze(view)),
                    || self.hedging.analyze(view),
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || self.metaphor.analyze(view),
                            || self.coherence.analyze(view),
                        )
                    },
                    || self.stylometry.analyze(view),
                )
            },
        );

        vec![drift, cadence, hedging, metaphor, coherence, stylometry]
    }

    /// Score one processed text
    ///
    /// Fails only when an analyzer yields a non-finite score.
    pub fn score(&self, processed: &ProcessedText) -> Result<ScoreResult> {
        let view = processed.view();
        let results = self.analyze(&view);

        let mut humanscore = 0.0;
        let mut breakdown = BTreeMap::new();
        let mut marker_details = BTreeMap::new();

        for result in results {
            let marker = result.marker();
            let raw = result.score();
            if !raw.is_finite() {
                return Err(ScoreError::InternalComputation {
                    marker: marker.to_string(),
                    message: format!("non-finite score {}", raw),
                });
            }

            let clamped = raw.clamp(0.0, 1.0);
            debug!("{} score: {:.4} (raw {:.4})", marker, clamped, raw);

            humanscore += self.weights.weight(marker) * clamped;
            breakdown.insert(marker, round_score(clamped));
            marker_details.insert(marker, result);
        }

        let humanscore = round_score(humanscore.clamp(0.0, 1.0));
        info!(
            "HumanScore: {:.4} ({} sentences, {} tokens)",
            humanscore, processed.sentence_count, processed.token_count
        );

        Ok(ScoreResult {
            humanscore,
            breakdown,
            metadata: ScoreMetadata {
                sentence_count: processed.sentence_count,
                token_count: processed.token_count,
                char_count: processed.char_count,
                marker_details,
            },
        })
    }
}

/// Weighted sum of per-marker scores (no clamping or rounding)
pub fn weighted_sum(weights: &MarkerWeights, scores: &BTreeMap<Marker, f64>) -> f64 {
    scores
        .iter()
        .map(|(marker, score)| weights.weight(*marker) * score)
        .sum()
}
