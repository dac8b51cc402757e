//! Hedging Language Detector
//!
//! Detects uncertainty markers and how unevenly they are spread across
//! sentences. People hedge inconsistently; generated text hedges uniformly.

use super::stats::{as_f64, spread};
use super::MarkerAnalyzer;
use crate::error::Result;
use crate::types::{MarkerResult, TextView};
use regex::Regex;
use std::collections::HashSet;
use traceneuro_common::Marker;

const HEDGING_MODALS: &[&str] = &[
    "maybe", "perhaps", "possibly", "probably", "likely", "unlikely", "might", "could", "may",
    "would", "should",
];

const HEDGING_VERBS: &[&str] = &[
    "seems", "appears", "suggests", "indicates", "implies", "think", "believe", "assume",
    "presume", "suppose",
];

const HEDGING_ADVERBS: &[&str] = &[
    "roughly", "approximately", "about", "around", "somewhat", "rather", "quite", "fairly",
    "relatively", "generally",
];

const HEDGING_PHRASES: &[&str] = &[
    r"i\s+(think|believe|feel|guess|suppose)",
    r"it\s+(seems|appears|looks)\s+(like|that|as\s+if)",
    r"(kind\s+of|sort\s+of)",
    r"(more\s+or\s+less)",
    r"(to\s+some\s+extent)",
    r"(in\s+a\s+way)",
];

/// Hedges per 100 words at which the density term saturates
const DENSITY_THRESHOLD: f64 = 5.0;
/// Per-sentence hedge variance at which the variance term saturates
const VARIANCE_THRESHOLD: f64 = 2.0;

pub struct HedgingDetector {
    phrases: Vec<Regex>,
}

impl HedgingDetector {
    pub fn new() -> Result<Self> {
        let phrases = HEDGING_PHRASES
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { phrases })
    }

    pub fn detect(&self, text: &str, sentences: &[String]) -> MarkerResult {
        let text_lower = text.to_lowercase();

        // Presence, not frequency: each lexicon word counts once
        let modal_count = count_present(HEDGING_MODALS, &text_lower);
        let verb_count = count_present(HEDGING_VERBS, &text_lower);
        let adverb_count = count_present(HEDGING_ADVERBS, &text_lower);
        let phrase_count = self.count_phrases(&text_lower);

        let total_hedging = modal_count + verb_count + adverb_count + phrase_count;

        let sentence_hedging: Vec<usize> = sentences
            .iter()
            .map(|s| self.count_sentence_hedging(s))
            .collect();
        let hedging_variance = spread(&as_f64(&sentence_hedging));

        let word_count = text.split_whitespace().count();
        let hedging_density = total_hedging as f64 / (word_count as f64 / 100.0).max(1.0);

        let density_score = (hedging_density / DENSITY_THRESHOLD).min(1.0);
        let variance_score = (hedging_variance / VARIANCE_THRESHOLD).min(1.0);
        let score = density_score * 0.5 + variance_score * 0.5;

        MarkerResult::new(Marker::Hedging, score)
            .with("total_hedging", total_hedging)
            .with("modal_count", modal_count)
            .with("verb_count", verb_count)
            .with("adverb_count", adverb_count)
            .with("phrase_count", phrase_count)
            .with("hedging_density", hedging_density)
            .with("hedging_variance", hedging_variance)
            .with("sentence_hedging", sentence_hedging)
    }

    /// Number of phrase patterns that match at least once
    fn count_phrases(&self, text_lower: &str) -> usize {
        self.phrases.iter().filter(|p| p.is_match(text_lower)).count()
    }

    /// Lexicon words in the sentence's word set plus matching phrase patterns
    fn count_sentence_hedging(&self, sentence: &str) -> usize {
        let lower = sentence.to_lowercase();
        let words: HashSet<&str> = lower.split_whitespace().collect();

        let lexicon_hits = [HEDGING_MODALS, HEDGING_VERBS, HEDGING_ADVERBS]
            .iter()
            .flat_map(|lexicon| lexicon.iter())
            .filter(|w| words.contains(**w))
            .count();

        lexicon_hits + self.count_phrases(&lower)
    }
}

impl MarkerAnalyzer for HedgingDetector {
    fn marker(&self) -> Marker {
        Marker::Hedging
    }

    fn analyze(&self, text: &TextView<'_>) -> MarkerResult {
        self.detect(text.cleaned, text.sentences)
    }
}

/// Lexicon entries occurring anywhere in the text, substrings included
fn count_present(lexicon: &[&str], text_lower: &str) -> usize {
    lexicon.iter().filter(|w| text_lower.contains(**w)).count()
}
