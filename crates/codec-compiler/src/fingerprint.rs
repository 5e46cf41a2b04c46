//! Schema fingerprint derivation

use sha2::{Digest, Sha256};

/// Derive the 64-bit schema fingerprint from canonical blob bytes.
///
/// SHA-256 over the blob, split into four 64-bit little-endian words,
/// folded with XOR. The per-word byte order matters: the result is
/// compared for exact equality against a fingerprint computed by the
/// counterpart system, so the convention is fixed, not a free choice.
pub fn fingerprint(blob: &[u8]) -> u64 {
    let digest = Sha256::digest(blob);
    digest
        .chunks_exact(8)
        .map(|chunk| {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            u64::from_le_bytes(word)
        })
        .fold(0, |acc, word| acc ^ word)
}
