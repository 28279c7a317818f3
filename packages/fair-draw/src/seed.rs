//! Seed construction
//!
//! Two seed families live here and are kept as separate types:
//!
//! - [`CommitmentSeed`] is built from two [`RawSeed`]s and only feeds the
//!   audit commitment hash.
//! - [`RandomnessSeed`] is the 32-byte key (normally a block hash) that drives
//!   the shuffle and the random number expansion.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{B256, U256, U512};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{DrawError, Result};
use crate::hashing::{digest_to_u256, double_sha256};

/// Hex width of a canonical randomness seed.
pub const SEED_HEX_WIDTH: usize = 64;

/// Bytes dropped from the front of a base58 payload (version marker).
pub const VERSION_PREFIX_LEN: usize = 1;

/// Bytes dropped from the back of a base58 payload (checksum).
pub const CHECKSUM_LEN: usize = 4;

/// Decoded seed material, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawSeed(Vec<u8>);

impl RawSeed {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode a hex literal as-is. No padding is applied.
    pub fn from_hex(literal: &str) -> Result<Self> {
        let bytes = hex::decode(strip_hex_prefix(literal))?;
        Ok(Self(bytes))
    }

    /// Decode a base58 literal and keep the payload between the 1-byte
    /// version marker and the 4-byte checksum.
    ///
    /// The checksum is stripped but never recomputed, so a corrupted literal
    /// that still uses the base58 alphabet yields a different seed instead of
    /// an error.
    pub fn from_base58_payload(literal: &str) -> Result<Self> {
        let decoded = bs58::decode(literal).into_vec()?;
        if decoded.len() < VERSION_PREFIX_LEN + CHECKSUM_LEN {
            return Err(DrawError::PayloadTooShort(decoded.len()));
        }

        let payload = decoded[VERSION_PREFIX_LEN..decoded.len() - CHECKSUM_LEN].to_vec();
        debug!(
            decoded_len = decoded.len(),
            payload_len = payload.len(),
            "stripped base58 version byte and checksum"
        );
        Ok(Self(payload))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Concatenation of two raw seeds, first then second, with no separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentSeed {
    combined: Vec<u8>,
}

impl CommitmentSeed {
    pub fn combine(first: &RawSeed, second: &RawSeed) -> Self {
        let mut combined = Vec::with_capacity(first.len() + second.len());
        combined.extend_from_slice(first.as_bytes());
        combined.extend_from_slice(second.as_bytes());
        Self { combined }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.combined
    }

    /// SHA-256(SHA-256(combined))
    pub fn commit(&self) -> Commitment {
        let hash = double_sha256(&[&self.combined]);
        debug!(combined_len = self.combined.len(), %hash, "computed commitment hash");
        Commitment { hash }
    }
}

/// Double hash of a [`CommitmentSeed`], published for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    hash: B256,
}

impl Commitment {
    pub fn hash(&self) -> B256 {
        self.hash
    }

    pub fn as_u256(&self) -> U256 {
        digest_to_u256(self.hash)
    }

    pub fn percentile(&self) -> Percentile {
        Percentile::of(self.as_u256())
    }
}

/// Position of a 256-bit value within `[0, 2^256 - 1]`, as a percentage with
/// six fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentile {
    /// Percentage scaled by 10^6, in `0..=100_000_000`.
    micros: u64,
}

impl Percentile {
    const SCALE: u64 = 1_000_000;

    /// `value / (2^256 - 1) * 100`, rounded half-up to six digits.
    pub fn of(value: U256) -> Self {
        let max = widen(U256::MAX);
        let numerator = widen(value) * U512::from(100 * Self::SCALE);
        let rounded = (numerator * U512::from(2u64) + max) / (max * U512::from(2u64));
        Self {
            micros: rounded.as_limbs()[0],
        }
    }

    pub fn as_micros(&self) -> u64 {
        self.micros
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:06}",
            self.micros / Self::SCALE,
            self.micros % Self::SCALE
        )
    }
}

/// 32-byte key driving the shuffle and the expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RandomnessSeed(B256);

impl RandomnessSeed {
    pub fn new(key: B256) -> Self {
        Self(key)
    }

    /// Left-pad the literal with zeros to 64 hex characters, then decode.
    ///
    /// Block hashes printed without their leading zeros map to the same key as
    /// the full-width form.
    pub fn from_hex(literal: &str) -> Result<Self> {
        let digits = strip_hex_prefix(literal);
        if digits.len() > SEED_HEX_WIDTH {
            return Err(DrawError::SeedTooLong(digits.len()));
        }

        let padded = format!("{digits:0>width$}", width = SEED_HEX_WIDTH);
        let bytes = hex::decode(padded)?;
        Ok(Self(B256::from_slice(&bytes)))
    }

    pub fn key(&self) -> &B256 {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl FromStr for RandomnessSeed {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for RandomnessSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

fn strip_hex_prefix(literal: &str) -> &str {
    literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
        .unwrap_or(literal)
}

pub(crate) fn widen(value: U256) -> U512 {
    U512::from_be_slice(&value.to_be_bytes::<32>())
}
