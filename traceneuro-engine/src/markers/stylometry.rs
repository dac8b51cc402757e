//! Stylometric Extractor
//!
//! Builds a flat writing-style fingerprint from character, word, sentence,
//! punctuation, and vocabulary features, and scores how spread out the
//! fingerprint values are.

use super::stats::{digit_ratio, mean, variance, DIGIT_PATTERN};
use super::{MarkerAnalyzer, NEUTRAL_SCORE};
use crate::error::Result;
use crate::types::{MarkerResult, TextView};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use traceneuro_common::Marker;

/// Punctuation symbols tracked by the fingerprint
pub const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '\u{2014}', '(', ')', '[', ']', '{', '}', '\'', '"',
];

/// Words longer than this count as long
const LONG_WORD: usize = 6;
/// Words shorter than this count as short
const SHORT_WORD: usize = 4;

pub type FeatureGroup = BTreeMap<String, f64>;

/// All fingerprint feature groups
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fingerprint {
    pub char_features: FeatureGroup,
    pub word_features: FeatureGroup,
    pub sentence_features: FeatureGroup,
    pub punct_features: FeatureGroup,
    pub vocab_features: FeatureGroup,
}

impl Fingerprint {
    /// Union of every group into one flat mapping
    pub fn flatten(&self) -> FeatureGroup {
        [
            &self.char_features,
            &self.word_features,
            &self.sentence_features,
            &self.punct_features,
            &self.vocab_features,
        ]
        .into_iter()
        .flat_map(|g| g.iter().map(|(k, v)| (k.clone(), *v)))
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct StylometricExtractor {
    digits: Regex,
}

impl StylometricExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            digits: Regex::new(DIGIT_PATTERN)?,
        })
    }

    pub fn fingerprint(&self, text: &str, sentences: &[String], tokens: &[String]) -> Fingerprint {
        Fingerprint {
            char_features: self.char_features(text),
            word_features: word_features(tokens),
            sentence_features: sentence_features(sentences),
            punct_features: punctuation_features(text),
            vocab_features: vocab_features(tokens),
        }
    }

    pub fn extract(&self, text: &str, sentences: &[String], tokens: &[String]) -> MarkerResult {
        let fingerprint = self.fingerprint(text, sentences, tokens);
        let flat = fingerprint.flatten();
        let score = uniqueness(&flat);

        MarkerResult::new(Marker::Stylometry, score)
            .with("fingerprint", flat)
            .with("char_features", fingerprint.char_features)
            .with("word_features", fingerprint.word_features)
            .with("sentence_features", fingerprint.sentence_features)
            .with("punct_features", fingerprint.punct_features)
            .with("vocab_features", fingerprint.vocab_features)
    }

    fn char_features(&self, text: &str) -> FeatureGroup {
        let len = text.chars().count();
        if len == 0 {
            return FeatureGroup::new();
        }
        let len_f = len as f64;
        let words = text.split_whitespace().count().max(1) as f64;

        group([
            ("avg_char_per_word", len_f / words),
            ("uppercase_ratio", text.chars().filter(|c| c.is_uppercase()).count() as f64 / len_f),
            ("digit_ratio", digit_ratio(&self.digits, text)),
            ("space_ratio", text.chars().filter(|&c| c == ' ').count() as f64 / len_f),
        ])
    }
}

impl MarkerAnalyzer for StylometricExtractor {
    fn marker(&self) -> Marker {
        Marker::Stylometry
    }

    fn analyze(&self, text: &TextView<'_>) -> MarkerResult {
        self.extract(text.cleaned, text.sentences, text.tokens)
    }
}

fn group<const N: usize>(entries: [(&str, f64); N]) -> FeatureGroup {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn word_features(tokens: &[String]) -> FeatureGroup {
    if tokens.is_empty() {
        return FeatureGroup::new();
    }
    let n = tokens.len() as f64;
    let lengths: Vec<usize> = tokens.iter().map(|t| t.chars().count()).collect();
    let lengths_f: Vec<f64> = lengths.iter().map(|&l| l as f64).collect();

    group([
        ("avg_word_length", mean(&lengths_f)),
        ("word_length_variance", variance(&lengths_f)),
        ("long_word_ratio", lengths.iter().filter(|&&l| l > LONG_WORD).count() as f64 / n),
        ("short_word_ratio", lengths.iter().filter(|&&l| l < SHORT_WORD).count() as f64 / n),
    ])
}

fn sentence_features(sentences: &[String]) -> FeatureGroup {
    if sentences.is_empty() {
        return FeatureGroup::new();
    }
    let word_counts: Vec<f64> = sentences
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();

    group([
        ("avg_sentence_length", mean(&word_counts)),
        ("sentence_length_variance", variance(&word_counts)),
        ("sentence_count", sentences.len() as f64),
    ])
}

fn punctuation_features(text: &str) -> FeatureGroup {
    let total = text.chars().count().max(1) as f64;
    PUNCTUATION
        .iter()
        .map(|&p| {
            let count = text.chars().filter(|&c| c == p).count();
            (format!("punct_{}_ratio", p), count as f64 / total)
        })
        .collect()
}

fn vocab_features(tokens: &[String]) -> FeatureGroup {
    if tokens.is_empty() {
        return FeatureGroup::new();
    }
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    let n = tokens.len() as f64;
    let unique = counts.len();
    let hapax = counts.values().filter(|&&c| c == 1).count();

    group([
        ("type_token_ratio", unique as f64 / n),
        ("hapax_ratio", hapax as f64 / n),
        ("unique_tokens", unique as f64),
        ("total_tokens", n),
    ])
}

/// Coefficient of variation over the positive fingerprint values, halved and capped
fn uniqueness(fingerprint: &FeatureGroup) -> f64 {
    let values: Vec<f64> = fingerprint.values().copied().filter(|&v| v > 0.0).collect();
    if values.len() < 2 {
        return NEUTRAL_SCORE;
    }

    let m = mean(&values);
    if m == 0.0 {
        return NEUTRAL_SCORE;
    }

    let cv = variance(&values).sqrt() / m;
    (cv / 2.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input_is_neutral() {
        let result = StylometricExtractor::new().unwrap().extract("", &[], &[]);
        assert_eq!(result.score(), 0.5);
        // punctuation ratios are always present, all zero
        let fingerprint = result.get("fingerprint").unwrap().as_map().unwrap();
        assert_eq!(fingerprint.len(), PUNCTUATION.len());
    }

    #[test]
    fn test_fingerprint_has_all_levels() {
        let text = "The quick brown fox jumps. It was 42 degrees!";
        let sentences = strings(&["The quick brown fox jumps", "It was 42 degrees"]);
        let tokens = strings(&["the", "quick", "brown", "fox", "jumps", "it", "was", "42", "degrees"]);
        let fp = StylometricExtractor::new().unwrap().fingerprint(text, &sentences, &tokens);

        assert_eq!(fp.char_features.len(), 4);
        assert_eq!(fp.word_features.len(), 4);
        assert_eq!(fp.sentence_features.len(), 3);
        assert_eq!(fp.punct_features.len(), 15);
        assert_eq!(fp.vocab_features.len(), 4);
        assert_eq!(fp.flatten().len(), 30);

        assert_eq!(fp.sentence_features["sentence_count"], 2.0);
        assert_eq!(fp.vocab_features["total_tokens"], 9.0);
        assert_eq!(fp.vocab_features["unique_tokens"], 9.0);
        assert!(fp.char_features["digit_ratio"] > 0.0);
    }

    #[test]
    fn test_hapax_ratio() {
        let tokens = strings(&["a", "a", "b", "c"]);
        let vocab = vocab_features(&tokens);
        assert_eq!(vocab["hapax_ratio"], 0.5);
        assert_eq!(vocab["type_token_ratio"], 0.75);
    }

    #[test]
    fn test_word_length_thresholds() {
        // "abcdefg" (7) is long, "abc" (3) is short, "abcd" (4) and "abcdef" (6) are neither
        let tokens = strings(&["abcdefg", "abc", "abcd", "abcdef"]);
        let words = word_features(&tokens);
        assert_eq!(words["long_word_ratio"], 0.25);
        assert_eq!(words["short_word_ratio"], 0.25);
    }

    #[test]
    fn test_uniqueness_uses_population_deviation() {
        // mean 2, population sd 1: cv 0.5, halved
        let mut flat = FeatureGroup::new();
        flat.insert("a".to_string(), 1.0);
        flat.insert("b".to_string(), 3.0);
        assert_eq!(uniqueness(&flat), 0.25);

        // zeros are left out
        flat.insert("c".to_string(), 0.0);
        assert_eq!(uniqueness(&flat), 0.25);
    }

    #[test]
    fn test_extract_score() {
        let result = StylometricExtractor::new().unwrap().extract(
            "Hi, hi 42!",
            &strings(&["Hi, hi 42"]),
            &strings(&["hi", "hi", "42"]),
        );
        let chars = result.get("char_features").unwrap().as_map().unwrap();
        assert_eq!(chars["digit_ratio"].as_number(), Some(0.2));
        assert!((result.score() - 0.47941710803586096).abs() < 1e-12);
    }

    #[test]
    fn test_uniqueness_bounds() {
        let mut flat = FeatureGroup::new();
        flat.insert("only".to_string(), 3.0);
        assert_eq!(uniqueness(&flat), 0.5);

        flat.insert("same".to_string(), 3.0);
        assert_eq!(uniqueness(&flat), 0.0);

        flat.insert("huge".to_string(), 1_000_000.0);
        let u = uniqueness(&flat);
        assert!(u > 0.0 && u <= 1.0);
    }
}
