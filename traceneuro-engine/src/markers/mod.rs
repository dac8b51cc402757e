//! Marker analyzers
//!
//! Six independent analyzers, each reading only the borrowed [`TextView`]
//! and returning a [`MarkerResult`]. No analyzer sees another's output.

use crate::types::{MarkerResult, TextView};
use traceneuro_common::Marker;

pub mod cadence;
pub mod coherence;
pub mod drift;
pub mod hedging;
pub mod metaphor;
pub mod stats;
pub mod stylometry;

pub use cadence::CadenceAnalyzer;
pub use coherence::CoherenceAnalyzer;
pub use drift::DriftAnalyzer;
pub use hedging::HedgingDetector;
pub use metaphor::MetaphorCounter;
pub use stylometry::StylometricExtractor;

/// Score every analyzer returns when it has too little input to measure
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Analyzer trait - all marker analyzers implement this
///
/// Implementations hold only immutable, construction-time state (compiled
/// patterns, lexicons), so a single instance can serve concurrent requests.
pub trait MarkerAnalyzer: Send + Sync {
    /// Which marker this analyzer produces
    fn marker(&self) -> Marker;

    /// Analyze the segmented text
    fn analyze(&self, text: &TextView<'_>) -> MarkerResult;
}
