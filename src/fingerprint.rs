use sha2::{Digest, Sha256};

/// SHA-256 of the decoded payload as lowercase hex.
///
/// Only used to correlate log lines for the same upload; it never appears in
/// a response.
pub fn payload_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
