//! Metaphor Rarity Counter
//!
//! Detects metaphor-like constructions and rewards unique, unevenly
//! distributed ones. Stock imagery common in generated prose is penalized.

use super::stats::{as_f64, spread};
use super::{MarkerAnalyzer, NEUTRAL_SCORE};
use crate::error::Result;
use crate::types::{MarkerResult, TextView};
use regex::Regex;
use std::collections::HashSet;
use traceneuro_common::Marker;

const METAPHOR_PATTERNS: &[&str] = &[
    // copula + "like"/"as" simile
    r"\b(is|are|was|were|be|being|been)\s+\w+\s+(like|as)\s+\w+",
    // generic "X is Y"
    r"\b\w+\s+(is|are|was|were)\s+\w+",
    // explicit figurative wording
    r"\b(metaphorically|figuratively|symbolically)",
];

const COMMON_AI_METAPHORS: &[&str] = &[
    "journey", "path", "road", "bridge", "foundation", "building", "key", "door", "window",
    "light", "darkness", "ocean", "wave",
];

const VARIANCE_THRESHOLD: f64 = 2.0;

pub struct MetaphorCounter {
    patterns: Vec<Regex>,
}

impl MetaphorCounter {
    pub fn new() -> Result<Self> {
        let patterns = METAPHOR_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn count(&self, text: &str, sentences: &[String]) -> MarkerResult {
        let text_lower = text.to_lowercase();

        let spans: Vec<&str> = self
            .patterns
            .iter()
            .flat_map(|p| p.find_iter(&text_lower).map(|m| m.as_str()))
            .collect();

        let common_count = COMMON_AI_METAPHORS
            .iter()
            .filter(|w| text_lower.contains(**w))
            .count();

        let total_metaphors = spans.len();
        let unique_metaphors = spans.iter().collect::<HashSet<_>>().len();
        let uniqueness_ratio = unique_metaphors as f64 / total_metaphors.max(1) as f64;

        let sentence_metaphors: Vec<usize> = sentences
            .iter()
            .map(|s| self.count_sentence_metaphors(s))
            .collect();
        let metaphor_variance = spread(&as_f64(&sentence_metaphors));

        // Approximates overlap as common words per detected span
        let common_penalty = if total_metaphors > 0 {
            (common_count as f64 / total_metaphors as f64).min(1.0)
        } else {
            0.0
        };
        let variance_score = (metaphor_variance / VARIANCE_THRESHOLD).min(1.0);

        let score = if total_metaphors == 0 {
            NEUTRAL_SCORE
        } else {
            uniqueness_ratio * 0.5 + (1.0 - common_penalty) * 0.3 + variance_score * 0.2
        };

        MarkerResult::new(Marker::Metaphor, score)
            .with("total_metaphors", total_metaphors)
            .with("unique_metaphors", unique_metaphors)
            .with("uniqueness_ratio", uniqueness_ratio)
            .with("common_ai_metaphors", common_count)
            .with("metaphor_variance", metaphor_variance)
            .with("sentence_metaphors", sentence_metaphors)
    }

    fn count_sentence_metaphors(&self, sentence: &str) -> usize {
        let lower = sentence.to_lowercase();
        self.patterns
            .iter()
            .map(|p| p.find_iter(&lower).count())
            .sum()
    }
}

impl MarkerAnalyzer for MetaphorCounter {
    fn marker(&self) -> Marker {
        Marker::Metaphor
    }

    fn analyze(&self, text: &TextView<'_>) -> MarkerResult {
        self.count(text.cleaned, text.sentences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> MetaphorCounter {
        MetaphorCounter::new().unwrap()
    }

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_metaphors_is_neutral() {
        let result = counter().count("Red. Blue. Green.", &sentences(&["Red", "Blue", "Green"]));
        assert_eq!(result.score(), 0.5);
        assert_eq!(result.number("total_metaphors"), Some(0.0));
        assert_eq!(result.number("uniqueness_ratio"), Some(0.0));
    }

    #[test]
    fn test_simile_matches_two_patterns() {
        let text = "Her voice was soft like velvet";
        let result = counter().count(text, &sentences(&[text]));
        // "was soft like velvet" and "voice was soft"
        assert_eq!(result.number("total_metaphors"), Some(2.0));
        assert_eq!(result.number("unique_metaphors"), Some(2.0));
        // uniqueness 1.0, no common words, single sentence => 0.5 + 0.3
        assert!((result.score() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_repeated_spans_lower_uniqueness() {
        let text = "time is money. time is money";
        let result = counter().count(text, &sentences(&["time is money", "time is money"]));
        assert_eq!(result.number("total_metaphors"), Some(2.0));
        assert_eq!(result.number("unique_metaphors"), Some(1.0));
        assert_eq!(result.number("uniqueness_ratio"), Some(0.5));
    }

    #[test]
    fn test_common_words_penalized() {
        let text = "Life is a journey down a road to the light";
        let result = counter().count(text, &sentences(&[text]));
        // one span ("life is a"), three common words => penalty capped at 1.0
        assert_eq!(result.number("common_ai_metaphors"), Some(3.0));
        assert!((result.score() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_figurative_marker_detected() {
        let text = "Speaking figuratively, we sank";
        let result = counter().count(text, &sentences(&[text]));
        assert_eq!(result.number("total_metaphors"), Some(1.0));
    }
}
