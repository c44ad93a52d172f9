//! Cryptographic utilities

use sha2::{Digest, Sha256};

/// Compare two secrets through their SHA-256 digests.
///
/// Digests have a fixed length, and the byte comparison below visits every
/// byte, so the time taken does not depend on where the inputs differ.
pub fn digests_match(provided: &str, expected: &str) -> bool {
    let a = Sha256::digest(provided.as_bytes());
    let b = Sha256::digest(expected.as_bytes());

    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
