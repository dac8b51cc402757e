//! Cadence Variability Analyzer
//!
//! Measures irregularity in sentence pacing. Human writing shows more
//! variance in sentence length, word count, punctuation pauses, and
//! within-sentence word-length rhythm than generated text.

use super::stats::{mean, normalized, sample_std_dev, spread};
use super::{MarkerAnalyzer, NEUTRAL_SCORE};
use crate::types::{MarkerResult, TextView};
use traceneuro_common::Marker;

/// Pause threshold for normalizing pause-score variance
const PAUSE_THRESHOLD: f64 = 2.0;
/// Rhythm threshold for normalizing rhythm variance
const RHYTHM_THRESHOLD: f64 = 0.1;
/// Bonus for short casual texts that still vary
const SHORT_TEXT_BONUS: f64 = 0.3;
/// Average words per sentence below which the bonus applies
const SHORT_TEXT_WORDS: f64 = 5.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct CadenceAnalyzer;

impl CadenceAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_sentences(&self, sentences: &[String]) -> MarkerResult {
        if sentences.len() < 2 {
            return MarkerResult::new(Marker::Cadence, NEUTRAL_SCORE)
                .with("sentence_length_variance", 0.0)
                .with("word_count_variance", 0.0)
                .with("pause_variance", 0.0)
                .with("rhythm_score", NEUTRAL_SCORE)
                .with("rhythm_variance", 0.0);
        }

        let lengths: Vec<f64> = sentences
            .iter()
            .map(|s| s.chars().count() as f64)
            .collect();
        let word_counts: Vec<f64> = sentences
            .iter()
            .map(|s| s.split_whitespace().count() as f64)
            .collect();
        let pauses: Vec<f64> = sentences.iter().map(|s| pause_score(s)).collect();
        let rhythms: Vec<f64> = sentences.iter().map(|s| rhythm(s)).collect();

        let length_variance = spread(&lengths);
        let word_variance = spread(&word_counts);
        let pause_variance = spread(&pauses);
        let rhythm_variance = spread(&rhythms);

        // Adaptive thresholds: lower for short casual texts, higher for formal ones
        let avg_length = mean(&lengths);
        let avg_words = mean(&word_counts);
        let length_threshold = (avg_length * 20.0).clamp(20.0, 2000.0);
        let word_threshold = (avg_words * 5.0).clamp(2.0, 100.0);

        let bonus = if avg_words < SHORT_TEXT_WORDS && (length_variance > 0.0 || word_variance > 0.0) {
            SHORT_TEXT_BONUS
        } else {
            0.0
        };

        let score = (normalized(length_variance, length_threshold) * 0.3
            + normalized(word_variance, word_threshold) * 0.3
            + normalized(pause_variance, PAUSE_THRESHOLD) * 0.2
            + normalized(rhythm_variance, RHYTHM_THRESHOLD) * 0.2
            + bonus)
            .min(1.0);

        MarkerResult::new(Marker::Cadence, score)
            .with("sentence_length_variance", length_variance)
            .with("word_count_variance", word_variance)
            .with("pause_variance", pause_variance)
            .with("rhythm_score", mean(&rhythms))
            .with("rhythm_variance", rhythm_variance)
    }
}

impl MarkerAnalyzer for CadenceAnalyzer {
    fn marker(&self) -> Marker {
        Marker::Cadence
    }

    fn analyze(&self, text: &TextView<'_>) -> MarkerResult {
        self.analyze_sentences(text.sentences)
    }
}

/// Weighted count of pause punctuation in a sentence
fn pause_score(sentence: &str) -> f64 {
    sentence
        .chars()
        .map(|c| match c {
            ',' | '(' => 0.5,
            ';' | ':' => 1.0,
            '\u{2014}' => 1.5,
            _ => 0.0,
        })
        .sum()
}

/// Coefficient of variation of word lengths (0.5 below two words)
fn rhythm(sentence: &str) -> f64 {
    let word_lengths: Vec<f64> = sentence
        .split_whitespace()
        .map(|w| w.chars().count() as f64)
        .collect();

    match sample_std_dev(&word_lengths) {
        Some(sd) => sd / mean(&word_lengths),
        None => NEUTRAL_SCORE,
    }
}
