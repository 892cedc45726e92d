//! SHA-256 fingerprints over canonical signature encodings.
//!
//! The full 32-byte digest backs collision diagnostics; the key suffix only
//! uses a 64-bit truncation of it.

use sha2::{Digest, Sha256};

/// Compute the 32-byte fingerprint as SHA-256 of the given bytes.
pub fn compute(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Truncate a fingerprint to the 64-bit value fed to the key synthesizer.
///
/// Big-endian over the first eight digest bytes, so the truncation is as
/// stable as the digest itself.
pub fn hash64(digest: &[u8; 32]) -> u64 {
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Render a fingerprint as lowercase hexadecimal for diagnostics.
pub fn to_hex(digest: &[u8; 32]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(64);
    for byte in digest {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}
