//! Feature encoder
//!
//! Turns text, sentences, and marker results into flat numeric vectors for
//! downstream analysis. Only simple statistical features are produced.

use crate::error::Result;
use crate::markers::stats::{digit_ratio, mean, DIGIT_PATTERN};
use crate::types::{MarkerResult, MetricValue};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

/// Length of the vector returned by [`FeatureEncoder::encode_text`]
pub const TEXT_FEATURES: usize = 10;

#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    digits: Regex,
}

impl FeatureEncoder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            digits: Regex::new(DIGIT_PATTERN)?,
        })
    }

    /// Ten statistical features of one text
    ///
    /// Order: char length, word count, type-token ratio, average word
    /// length, counts of `.` `,` `?` `!`, uppercase ratio, digit ratio.
    pub fn encode_text(&self, text: &str) -> [f64; TEXT_FEATURES] {
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len().max(1) as f64;
        let char_len = text.chars().count();
        let chars = char_len.max(1) as f64;

        let distinct = words.iter().collect::<HashSet<_>>().len();
        let word_chars: usize = words.iter().map(|w| w.chars().count()).sum();
        let count = |c: char| text.chars().filter(|&x| x == c).count() as f64;

        [
            char_len as f64,
            words.len() as f64,
            distinct as f64 / word_count,
            word_chars as f64 / word_count,
            count('.'),
            count(','),
            count('?'),
            count('!'),
            text.chars().filter(|c| c.is_uppercase()).count() as f64 / chars,
            digit_ratio(&self.digits, text),
        ]
    }

    /// One row of text features per sentence
    pub fn encode_sentences(&self, sentences: &[String]) -> Vec<[f64; TEXT_FEATURES]> {
        sentences.iter().map(|s| self.encode_text(s)).collect()
    }

    /// Every number in a marker result, in metric-name order
    ///
    /// Lists contribute their mean (empty lists nothing) and sub-maps are
    /// flattened recursively. A result with no numbers encodes as `[0.0]`.
    pub fn encode_markers(&self, result: &MarkerResult) -> Vec<f64> {
        let mut features = Vec::new();
        collect_numbers(result.metrics(), &mut features);
        if features.is_empty() {
            features.push(0.0);
        }
        features
    }
}

fn collect_numbers(map: &BTreeMap<String, MetricValue>, out: &mut Vec<f64>) {
    for value in map.values() {
        match value {
            MetricValue::Number(n) => out.push(*n),
            MetricValue::List(values) if !values.is_empty() => out.push(mean(values)),
            MetricValue::List(_) => {}
            MetricValue::Map(inner) => collect_numbers(inner, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traceneuro_common::Marker;

    #[test]
    fn test_encode_text() {
        let features = FeatureEncoder::new().unwrap().encode_text("Hi, hi 42!");
        assert_eq!(features[0], 10.0);
        assert_eq!(features[1], 3.0);
        // "Hi," "hi" "42!" are all distinct
        assert_eq!(features[2], 1.0);
        assert!((features[3] - 8.0 / 3.0).abs() < 1e-12);
        assert_eq!(&features[4..8], &[0.0, 1.0, 0.0, 1.0]);
        assert_eq!(features[8], 0.1);
        assert_eq!(features[9], 0.2);
    }

    #[test]
    fn test_digit_ratio_skips_fractions_and_numerals() {
        let features = FeatureEncoder::new().unwrap().encode_text("x\u{bd} y\u{b2} \u{2163}");
        assert_eq!(features[9], 1.0 / 7.0);
    }

    #[test]
    fn test_encode_empty_text() {
        let features = FeatureEncoder::new().unwrap().encode_text("");
        assert!(features.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_encode_sentences_rows() {
        let sentences = vec!["One two".to_string(), "Three".to_string()];
        let rows = FeatureEncoder::new().unwrap().encode_sentences(&sentences);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], 2.0);
        assert_eq!(rows[1][1], 1.0);
    }

    #[test]
    fn test_encode_markers_traversal() {
        let mut nested = BTreeMap::new();
        nested.insert("b".to_string(), 7.0);
        nested.insert("a".to_string(), 5.0);

        let result = MarkerResult::new(Marker::Stylometry, 0.25)
            .with("a_list", vec![1.0, 3.0])
            .with("b_empty", Vec::<f64>::new())
            .with("c_nested", nested);

        // keys in order: a_list, b_empty, c_nested{a, b}, stylometry_score
        let encoded = FeatureEncoder::new().unwrap().encode_markers(&result);
        assert_eq!(encoded, vec![2.0, 5.0, 7.0, 0.25]);
    }
}
