//! Short content hashes for generated gene names.

use sha2::{Digest, Sha256};

/// Hex characters kept from the digest.
pub const SHORT_HASH_LEN: usize = 8;

/// First [`SHORT_HASH_LEN`] hex characters of the SHA-256 of `text`.
pub fn short_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(SHORT_HASH_LEN);
    hex
}
