//! Credential hashing
//!
//! Single-pass, unsalted SHA-256 rendered as lowercase hex. Stored digests in
//! existing `usuarios` tables depend on this exact format, so it must not
//! change without a rehash of every account.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded digest.
pub const DIGEST_LEN: usize = 64;

/// Hash a plaintext secret.
pub fn hash(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a plaintext secret against a stored digest.
///
/// Plain string equality; this does not try to be constant-time. An empty
/// digest never matches.
pub fn verify(secret: &str, digest: &str) -> bool {
    !digest.is_empty() && hash(secret) == digest
}
