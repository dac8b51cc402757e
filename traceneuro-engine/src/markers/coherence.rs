//! Coherence Break Analyzer
//!
//! Detects mid-thought direction changes, topic shifts, and abrupt
//! sentence-to-sentence transitions.

use super::stats::{as_f64, spread};
use super::{MarkerAnalyzer, NEUTRAL_SCORE};
use crate::error::Result;
use crate::types::{MarkerResult, TextView};
use regex::Regex;
use traceneuro_common::Marker;

const BREAK_MARKERS: &[&str] = &[
    r"\b(but|however|although|though|yet)",
    r"\b(actually|wait|hold\s+on|hmm|well)",
    r"\b(let\s+me\s+think|actually|come\s+to\s+think)",
    r"\b(on\s+second\s+thought|then\s+again)",
    r"\b(nevermind|scratch\s+that)",
];

const TOPIC_SHIFT_MARKERS: &[&str] = &[
    r"\b(speaking\s+of|by\s+the\s+way|incidentally)",
    r"\b(that\s+reminds\s+me|oh\s+yeah)",
    r"\b(changing\s+the\s+subject|anyway)",
];

/// Explicit connectives that make a transition read as smooth
const TRANSITION_WORDS: &[&str] = &[
    "furthermore",
    "moreover",
    "additionally",
    "in addition",
    "therefore",
    "thus",
    "hence",
    "consequently",
    "first",
    "second",
    "finally",
    "next",
    "then",
];

/// Transition score when the next sentence opens with a connective
const SMOOTH_TRANSITION: f64 = 0.3;
/// Transition score for an abrupt change
const ABRUPT_TRANSITION: f64 = 0.7;

pub struct CoherenceAnalyzer {
    break_markers: Vec<Regex>,
    topic_shift_markers: Vec<Regex>,
}

impl CoherenceAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            break_markers: compile(BREAK_MARKERS)?,
            topic_shift_markers: compile(TOPIC_SHIFT_MARKERS)?,
        })
    }

    pub fn analyze_sentences(&self, sentences: &[String]) -> MarkerResult {
        if sentences.len() < 2 {
            return MarkerResult::new(Marker::Coherence, NEUTRAL_SCORE)
                .with("break_count", 0usize)
                .with("topic_shifts", 0usize)
                .with("break_density", 0.0)
                .with("coherence_variance", 0.0)
                .with("transition_variance", 0.0)
                .with("sentence_breaks", Vec::<usize>::new());
        }

        let lowered: Vec<String> = sentences.iter().map(|s| s.to_lowercase()).collect();

        let sentence_breaks: Vec<usize> = lowered.iter().map(|s| self.count_breaks(s)).collect();
        let total_breaks: usize = sentence_breaks.iter().sum();
        let topic_shifts = lowered.iter().filter(|s| self.has_topic_shift(s)).count();

        let break_variance = spread(&as_f64(&sentence_breaks));

        let transitions = transition_scores(&lowered);
        let transition_variance = spread(&transitions);

        let n = sentences.len() as f64;
        let break_density = total_breaks as f64 / n;
        let break_score = (break_density / 2.0).min(1.0);
        let variance_score = ((break_variance + transition_variance) / 4.0).min(1.0);
        let shift_score = (topic_shifts as f64 / (n / 5.0).max(1.0)).min(1.0);

        let score = break_score * 0.4 + variance_score * 0.4 + shift_score * 0.2;

        MarkerResult::new(Marker::Coherence, score)
            .with("break_count", total_breaks)
            .with("topic_shifts", topic_shifts)
            .with("break_density", break_density)
            .with("coherence_variance", break_variance)
            .with("transition_variance", transition_variance)
            .with("sentence_breaks", sentence_breaks)
    }

    fn count_breaks(&self, sentence_lower: &str) -> usize {
        self.break_markers
            .iter()
            .map(|p| p.find_iter(sentence_lower).count())
            .sum()
    }

    fn has_topic_shift(&self, sentence_lower: &str) -> bool {
        self.topic_shift_markers
            .iter()
            .any(|p| p.is_match(sentence_lower))
    }
}

impl MarkerAnalyzer for CoherenceAnalyzer {
    fn marker(&self) -> Marker {
        Marker::Coherence
    }

    fn analyze(&self, text: &TextView<'_>) -> MarkerResult {
        self.analyze_sentences(text.sentences)
    }
}

fn compile(patterns: &[&str]) -> Result<Vec<Regex>> {
    Ok(patterns
        .iter()
        .map(|p| Regex::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?)
}

/// One score per adjacent pair, judged by the following sentence
fn transition_scores(sentences_lower: &[String]) -> Vec<f64> {
    sentences_lower
        .windows(2)
        .map(|pair| {
            let next = &pair[1];
            if TRANSITION_WORDS.iter().any(|w| next.contains(w)) {
                SMOOTH_TRANSITION
            } else {
                ABRUPT_TRANSITION
            }
        })
        .collect()
}
