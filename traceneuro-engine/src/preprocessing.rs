//! Text normalizer and segmenter
//!
//! Cleans raw text, splits it into sentences, and tokenizes it into
//! lower-cased words. Every operation is a total function over strings.

use crate::error::Result;
use crate::types::ProcessedText;
use regex::Regex;
use traceneuro_common::ScoringConfig;

/// Default shortest sentence kept by segmentation
pub const DEFAULT_MIN_SENTENCE_LENGTH: usize = 3;
/// Default longest sentence kept by segmentation
pub const DEFAULT_MAX_SENTENCE_LENGTH: usize = 500;

/// Placeholder substituted for every URL
pub const URL_PLACEHOLDER: &str = "[URL]";

pub struct TextProcessor {
    min_sentence_length: usize,
    max_sentence_length: usize,
    whitespace: Regex,
    url: Regex,
    ellipsis: Regex,
    sentence_break: Regex,
    word: Regex,
}

impl TextProcessor {
    pub fn new() -> Result<Self> {
        Self::with_bounds(DEFAULT_MIN_SENTENCE_LENGTH, DEFAULT_MAX_SENTENCE_LENGTH)
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        Self::with_bounds(config.min_sentence_length, config.max_sentence_length)
    }

    /// Processor keeping sentences whose trimmed length is in `[min, max]`
    pub fn with_bounds(min_sentence_length: usize, max_sentence_length: usize) -> Result<Self> {
        Ok(Self {
            min_sentence_length,
            max_sentence_length,
            whitespace: Regex::new(r"\s+")?,
            url: Regex::new(r"https?://\S+")?,
            ellipsis: Regex::new(r"\.{3,}")?,
            sentence_break: Regex::new(r"[.!?]+")?,
            word: Regex::new(r"[\w\p{No}]+")?,
        })
    }

    /// Run the full pipeline: clean, segment, tokenize
    pub fn process(&self, text: &str) -> ProcessedText {
        let cleaned = self.clean(text);
        let sentences = self.segment_sentences(&cleaned);
        let tokens = self.tokenize(&cleaned);

        ProcessedText {
            original: text.to_string(),
            char_count: cleaned.chars().count(),
            sentence_count: sentences.len(),
            token_count: tokens.len(),
            cleaned,
            sentences,
            tokens,
        }
    }

    /// Normalize whitespace, URLs, quotes, and runs of periods
    pub fn clean(&self, text: &str) -> String {
        let text = self.whitespace.replace_all(text, " ");
        let text = self.url.replace_all(&text, URL_PLACEHOLDER);
        let text = normalize_quotes(&text);
        let text = self.ellipsis.replace_all(&text, "...");
        text.trim().to_string()
    }

    /// Split on runs of `.`, `!`, `?` and keep fragments within the length bounds
    pub fn segment_sentences(&self, text: &str) -> Vec<String> {
        self.sentence_break
            .split(text)
            .map(str::trim)
            .filter(|s| {
                let len = s.chars().count();
                len >= self.min_sentence_length && len <= self.max_sentence_length
            })
            .map(str::to_string)
            .collect()
    }

    /// Lower-case and extract maximal word-character runs
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.word
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Map curly single and double quotes to their straight forms
fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}
