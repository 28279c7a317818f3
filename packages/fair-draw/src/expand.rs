use alloy_primitives::U256;
use serde::ser::{SerializeSeq, Serializer};
use tracing::{debug, trace};

use crate::hashing::{digest_to_u256, double_sha256, encode_index};
use crate::seed::RandomnessSeed;

/// Random value for position `index`: `SHA256(SHA256(seed || be32(index)))`.
///
/// Each index is derived independently of every other index and of the
/// shuffle.
pub fn random_at(seed: &RandomnessSeed, index: u32) -> U256 {
    let digest = double_sha256(&[seed.as_bytes(), &encode_index(index)]);
    trace!(index, %digest, "expanded random value");
    digest_to_u256(digest)
}

/// Random values for positions `0..count`.
pub fn expand(seed: &RandomnessSeed, count: u32) -> Vec<U256> {
    let values: Vec<U256> = (0..count).map(|index| random_at(seed, index)).collect();
    debug!(count, "expanded random sequence");
    values
}

/// Render a random value as `0x` followed by 64 lowercase hex digits.
pub fn format_random(value: &U256) -> String {
    format!("0x{}", hex::encode(value.to_be_bytes::<32>()))
}

pub(crate) fn serialize_random<S: Serializer>(
    value: &U256,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_random(value))
}

pub(crate) fn serialize_random_seq<S: Serializer>(
    values: &[U256],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for value in values {
        seq.serialize_element(&format_random(value))?;
    }
    seq.end()
}
