//! Core value types for the scoring pipeline
//!
//! All of these are transient: built once per scoring request and never
//! mutated after construction.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::collections::BTreeMap;
use traceneuro_common::Marker;

// ============================================================================
// Preprocessing output
// ============================================================================

/// Normalized, segmented, and tokenized input
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct ProcessedText {
    /// Raw input as received
    pub original: String,
    /// Whitespace-collapsed, URL-masked, quote-normalized text
    pub cleaned: String,
    /// Sentences whose trimmed length is within the configured bounds
    pub sentences: Vec<String>,
    /// Lower-cased word-character runs of the cleaned text
    pub tokens: Vec<String>,
    pub sentence_count: usize,
    pub token_count: usize,
    /// Length of the cleaned text in characters
    pub char_count: usize,
}

impl ProcessedText {
    /// Read-only view handed to the analyzers
    pub fn view(&self) -> TextView<'_> {
        TextView {
            cleaned: &self.cleaned,
            sentences: &self.sentences,
            tokens: &self.tokens,
        }
    }
}

/// The narrow input contract every analyzer receives
#[derive(Debug, Clone, Copy)]
pub struct TextView<'a> {
    pub cleaned: &'a str,
    pub sentences: &'a [String],
    pub tokens: &'a [String],
}

// ============================================================================
// Marker results
// ============================================================================

/// Numeric tree node stored in a marker result
///
/// Traversal over this enum is exhaustive: a value is a single number, a flat
/// list of numbers, or a named sub-map.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    List(Vec<f64>),
    Map(BTreeMap<String, MetricValue>),
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            MetricValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, MetricValue>> {
        match self {
            MetricValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// True when every number in this subtree is finite
    pub fn is_finite(&self) -> bool {
        match self {
            MetricValue::Number(n) => n.is_finite(),
            MetricValue::List(values) => values.iter().all(|v| v.is_finite()),
            MetricValue::Map(map) => map.values().all(MetricValue::is_finite),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<usize> for MetricValue {
    fn from(value: usize) -> Self {
        MetricValue::Number(value as f64)
    }
}

impl From<Vec<f64>> for MetricValue {
    fn from(values: Vec<f64>) -> Self {
        MetricValue::List(values)
    }
}

impl From<Vec<usize>> for MetricValue {
    fn from(values: Vec<usize>) -> Self {
        MetricValue::List(values.into_iter().map(|v| v as f64).collect())
    }
}

impl From<BTreeMap<String, f64>> for MetricValue {
    fn from(map: BTreeMap<String, f64>) -> Self {
        MetricValue::Map(
            map.into_iter()
                .map(|(k, v)| (k, MetricValue::Number(v)))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, MetricValue>> for MetricValue {
    fn from(map: BTreeMap<String, MetricValue>) -> Self {
        MetricValue::Map(map)
    }
}

/// One analyzer's output: metric name to value, always holding the marker's
/// designated score under [`Marker::score_key`]
///
/// Serializes as a flat map of its metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerResult {
    marker: Marker,
    score: f64,
    metrics: BTreeMap<String, MetricValue>,
}

impl MarkerResult {
    pub fn new(marker: Marker, score: f64) -> Self {
        let mut metrics = BTreeMap::new();
        metrics.insert(marker.score_key().to_string(), MetricValue::Number(score));
        Self {
            marker,
            score,
            metrics,
        }
    }

    /// Add an auxiliary metric (builder style)
    ///
    /// The designated score key cannot be overwritten this way.
    pub fn with(mut self, name: &str, value: impl Into<MetricValue>) -> Self {
        if name != self.marker.score_key() {
            self.metrics.insert(name.to_string(), value.into());
        }
        self
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// The designated scalar marker score (unclamped)
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(MetricValue::as_number)
    }

    pub fn metrics(&self) -> &BTreeMap<String, MetricValue> {
        &self.metrics
    }
}

impl Serialize for MarkerResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.metrics.len()))?;
        for (name, value) in &self.metrics {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Fusion output
// ============================================================================

/// Descriptive metadata attached to every score
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoreMetadata {
    pub sentence_count: usize,
    pub token_count: usize,
    pub char_count: usize,
    /// Full result map of every analyzer
    pub marker_details: BTreeMap<Marker, MarkerResult>,
}

/// Fused HumanScore with per-marker breakdown
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoreResult {
    /// Weighted sum of the clamped marker scores, rounded to 4 decimals
    pub humanscore: f64,
    /// Clamped marker scores, rounded to 4 decimals
    pub breakdown: BTreeMap<Marker, f64>,
    pub metadata: ScoreMetadata,
}

impl ScoreResult {
    pub fn marker_score(&self, marker: Marker) -> Option<f64> {
        self.breakdown.get(&marker).copied()
    }

    pub fn details(&self, marker: Marker) -> Option<&MarkerResult> {
        self.metadata.marker_details.get(&marker)
    }
}
