//! Test Helper Utilities
//!
//! Shared utilities for testing traceneuro-engine

#![allow(dead_code, unused_imports)]

pub mod log_capture;

pub use log_capture::{init_test_logging, LogCapture};

/// Three-sentence text with one hedge ("maybe")
pub const SCENARIO_TEXT: &str =
    "This is a sample text for testing. It contains multiple sentences. Maybe we can analyze it?";

/// Casual text with uneven pacing, hedges, and topic shifts
pub const CASUAL_TEXT: &str = "So I went to the store. Wait, actually, no. I think it was the \
    market, kind of. Anyway! The apples were like little red lanterns; honestly, they were \
    perfect. By the way, did you call?";

/// Uniform, connective-heavy text
pub const FORMAL_TEXT: &str = "The system processes the input data. Furthermore, the system \
    validates the input data. Therefore, the system stores the input data. Finally, the system \
    reports the input data.";
