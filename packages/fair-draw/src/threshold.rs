//! Win thresholds for address-keyed lotteries
//!
//! A coefficient (expected number of winners, fixed-point scaled by
//! [`SCALE_FACTOR`]) is turned into a 256-bit threshold. Each participant
//! draws `SHA256(SHA256(seed || payload))` from its base58 address payload
//! and wins when that value does not exceed the threshold.

use alloy_primitives::{U256, U512};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{DrawError, Result};
use crate::expand::{format_random, serialize_random};
use crate::hashing::{digest_to_u256, double_sha256};
use crate::seed::{widen, RandomnessSeed, RawSeed};

/// Fixed-point scale of coefficients (10^15).
pub const SCALE_FACTOR: u64 = 1_000_000_000_000_000;

/// Fractional digits kept in the threshold percentage.
const PERCENT_DIGITS: usize = 16;

/// Participant as listed in a round file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub number: u64,
    /// Base58 address; its payload keys the participant's random value
    pub player: String,
}

/// Random value and verdict for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantOutcome {
    pub number: u64,
    pub player: String,
    #[serde(serialize_with = "serialize_random")]
    pub random_value: U256,
    pub is_winner: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinThreshold {
    coefficient: U256,
    participants: u64,
    threshold: U256,
}

impl WinThreshold {
    /// `floor(2^256 * coefficient / (participants * SCALE_FACTOR))`, saturating
    /// at `U256::MAX` once the win chance reaches 1.
    pub fn new(coefficient: U256, participants: u64) -> Result<Self> {
        if participants == 0 {
            return Err(DrawError::NoParticipants);
        }

        let numerator = widen(coefficient) << 256usize;
        let quotient = numerator / scaled_population(participants);

        let threshold = if quotient > widen(U256::MAX) {
            warn!(participants, "win chance above 1, every participant wins");
            U256::MAX
        } else {
            narrow(quotient)
        };

        debug!(participants, threshold = %format_random(&threshold), "computed win threshold");
        Ok(Self {
            coefficient,
            participants,
            threshold,
        })
    }

    pub fn threshold(&self) -> U256 {
        self.threshold
    }

    pub fn participants(&self) -> u64 {
        self.participants
    }

    pub fn is_winner(&self, value: U256) -> bool {
        value <= self.threshold
    }

    /// Win chance as a percentage with up to 16 fractional digits, trailing
    /// zeros trimmed.
    pub fn percent(&self) -> String {
        let ten = U512::from(10u64);
        let numerator = widen(self.coefficient) * ten.pow(U512::from(18u64));
        let percent = numerator / scaled_population(self.participants);
        format_fixed_point(&percent.to_string(), PERCENT_DIGITS)
    }

    /// Coefficient with the fixed-point scale removed.
    pub fn coefficient_display(&self) -> String {
        format_fixed_point(&self.coefficient.to_string(), 15)
    }
}

/// Parse a coefficient literal, `0x`-prefixed hex or decimal.
pub fn parse_coefficient(literal: &str) -> Result<U256> {
    let literal = literal.trim();
    let parsed = match literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
    {
        Some(digits) => U256::from_str_radix(digits, 16),
        None => U256::from_str_radix(literal, 10),
    };
    parsed.map_err(|e| DrawError::Config(format!("invalid coefficient {literal}: {e}")))
}

/// `SHA256(SHA256(seed || payload))` for one participant address payload.
pub fn address_random(seed: &RandomnessSeed, payload: &RawSeed) -> U256 {
    digest_to_u256(double_sha256(&[seed.as_bytes(), payload.as_bytes()]))
}

/// Draw a value for every participant and mark winners, ordered by number.
pub fn evaluate(
    seed: &RandomnessSeed,
    participants: &[Participant],
    threshold: &WinThreshold,
) -> Result<Vec<ParticipantOutcome>> {
    let mut outcomes = participants
        .iter()
        .map(|participant| {
            let payload = RawSeed::from_base58_payload(&participant.player)?;
            let random_value = address_random(seed, &payload);
            Ok(ParticipantOutcome {
                number: participant.number,
                player: participant.player.clone(),
                random_value,
                is_winner: threshold.is_winner(random_value),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    outcomes.sort_by_key(|outcome| outcome.number);
    debug!(
        participants = outcomes.len(),
        winners = outcomes.iter().filter(|o| o.is_winner).count(),
        "evaluated participants"
    );
    Ok(outcomes)
}

fn scaled_population(participants: u64) -> U512 {
    U512::from(participants) * U512::from(SCALE_FACTOR)
}

fn narrow(value: U512) -> U256 {
    U256::from_be_slice(&value.to_be_bytes::<64>()[32..])
}

/// Insert a decimal point `decimals` digits from the right of an integer
/// string and trim trailing fractional zeros.
fn format_fixed_point(digits: &str, decimals: usize) -> String {
    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (integer, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}
