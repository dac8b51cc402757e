//! Semantic Drift Analyzer
//!
//! Tracks how sentences change from one to the next. The per-sentence
//! vector is a four-feature lexical proxy (length, word count, capitalization
//! ratio, question/exclamation count) standing in for a sentence embedding;
//! [`sentence_features`] is the seam where an embedding would plug in.

use super::stats::{mean, variance};
use super::{MarkerAnalyzer, NEUTRAL_SCORE};
use crate::types::{MarkerResult, MetricValue, TextView};
use std::collections::BTreeMap;
use traceneuro_common::Marker;

/// Dimension of the drift feature proxy
pub const DRIFT_DIMENSIONS: usize = 4;

const VARIANCE_THRESHOLD: f64 = 0.1;

pub type DriftVector = [f64; DRIFT_DIMENSIONS];

#[derive(Debug, Default, Clone, Copy)]
pub struct DriftAnalyzer;

impl DriftAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_sentences(&self, sentences: &[String]) -> MarkerResult {
        let vectors = drift_vectors(sentences);
        if vectors.is_empty() {
            return MarkerResult::new(Marker::Drift, NEUTRAL_SCORE)
                .with("drift_variance", 0.0)
                .with("mean_drift", 0.0)
                .with("drift_magnitudes", Vec::<f64>::new())
                .with("drift_vectors", BTreeMap::<String, MetricValue>::new());
        }

        let magnitudes: Vec<f64> = vectors.iter().map(norm).collect();
        let mean_drift = mean(&magnitudes);
        let drift_variance = variance(&magnitudes);

        let score = (drift_variance / VARIANCE_THRESHOLD).min(1.0) * 0.6 + mean_drift.min(1.0) * 0.4;

        let keyed_vectors: BTreeMap<String, MetricValue> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("pair_{:04}", i), MetricValue::List(v.to_vec())))
            .collect();

        MarkerResult::new(Marker::Drift, score)
            .with("drift_variance", drift_variance)
            .with("mean_drift", mean_drift)
            .with("drift_magnitudes", magnitudes)
            .with("drift_vectors", keyed_vectors)
    }
}

impl MarkerAnalyzer for DriftAnalyzer {
    fn marker(&self) -> Marker {
        Marker::Drift
    }

    fn analyze(&self, text: &TextView<'_>) -> MarkerResult {
        self.analyze_sentences(text.sentences)
    }
}

/// Feature proxy for one sentence
pub fn sentence_features(sentence: &str) -> DriftVector {
    let char_len = sentence.chars().count();
    let uppercase = sentence.chars().filter(|c| c.is_uppercase()).count();
    let marks = sentence.chars().filter(|c| matches!(c, '?' | '!')).count();

    [
        char_len as f64,
        sentence.split_whitespace().count() as f64,
        uppercase as f64 / char_len.max(1) as f64,
        marks as f64,
    ]
}

/// Feature difference for each adjacent sentence pair
pub fn drift_vectors(sentences: &[String]) -> Vec<DriftVector> {
    let features: Vec<DriftVector> = sentences.iter().map(|s| sentence_features(s)).collect();
    features
        .windows(2)
        .map(|pair| {
            let mut diff = [0.0; DRIFT_DIMENSIONS];
            for (d, (cur, prev)) in diff.iter_mut().zip(pair[1].iter().zip(pair[0].iter())) {
                *d = cur - prev;
            }
            diff
        })
        .collect()
}

fn norm(v: &DriftVector) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}
