use alloy_primitives::{B256, U256};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

/// Calculate SHA-256 over the concatenation of `parts`.
pub(crate) fn sha256(parts: &[&[u8]]) -> B256 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    B256::from_slice(&hasher.finalize())
}

/// Calculate SHA-256(SHA-256(parts)).
pub(crate) fn double_sha256(parts: &[&[u8]]) -> B256 {
    let inner = sha256(parts);
    sha256(&[inner.as_slice()])
}

/// Calculate HMAC-SHA256.
pub(crate) fn hmac_sha256(key: &[u8], data: &[u8]) -> B256 {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    B256::from_slice(&mac.finalize().into_bytes())
}

/// Interpret a digest as a big-endian unsigned integer.
pub(crate) fn digest_to_u256(digest: B256) -> U256 {
    U256::from_be_bytes(digest.0)
}

/// Hash-input encoding for a position index.
pub(crate) fn encode_index(index: u32) -> [u8; 4] {
    index.to_be_bytes()
}
