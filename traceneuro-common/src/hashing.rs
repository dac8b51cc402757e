//! Input hashing
//!
//! The history store keys results by the SHA-256 of the raw input text.

use sha2::{Digest, Sha256};

/// Lower-case hex SHA-256 of the raw UTF-8 input
pub fn text_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("{:x}", digest)
}
