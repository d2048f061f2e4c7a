//! `intent_hash36(lowercased prompt)`: the exact cache key.

use context::Intent;
use sha2::{Digest, Sha256};

/// Hashes `intent` and the lowercased, trimmed prompt together, then encodes
/// the digest as base36 for a compact, readable key.
pub fn intent_hash36(intent: Intent, prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{intent:?}").as_bytes());
    hasher.update(b"\0");
    hasher.update(prompt.trim().to_ascii_lowercase().as_bytes());
    let digest = hasher.finalize();

 // Base36-encode the first 16 bytes of the digest; plenty of entropy for
 // a 500-entry bounded cache and much shorter than the hex digest.
    let mut value = u128::from_be_bytes(digest[..16].try_into().expect("16 bytes"));
    if value == 0 {
        return "0".to_string();
    }

    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut chars = Vec::new();
    while value > 0 {
        chars.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    chars.reverse();
    String::from_utf8(chars).expect("alphabet is ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_deterministic() {
        assert_eq!(intent_hash36(Intent::SimpleQa, "What is Rust?"), intent_hash36(Intent::SimpleQa, "what is rust?"));
    }

    #[test]
    fn differs_by_intent() {
        assert_ne!(intent_hash36(Intent::SimpleQa, "ping"), intent_hash36(Intent::Creative, "ping"));
    }

    #[test]
    fn differs_by_prompt() {
        assert_ne!(intent_hash36(Intent::SimpleQa, "ping"), intent_hash36(Intent::SimpleQa, "pong"));
    }
}
