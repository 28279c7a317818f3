//! Provably fair draws seeded by a public block hash.
//!
//! Given the same inputs, anyone can recompute every output of a draw:
//!
//! - a commitment hash, `SHA256(SHA256(seed1 || seed2))`, with its percentile
//!   in the 256-bit hash space
//! - a keyed Fisher-Yates permutation of the items (HMAC-SHA256 per step)
//! - one random value per position, `SHA256(SHA256(seed || be32(index)))`
//! - the records pairing each item with its position and random value
//!
//! Every function is pure; nothing is printed. Progress is reported through
//! `tracing` events.

pub mod config;
pub mod correlate;
pub mod draw;
pub mod errors;
pub mod expand;
mod hashing;
pub mod seed;
pub mod shuffle;
pub mod threshold;

pub use config::DrawConfig;
pub use correlate::{correlate, ResultRecord};
pub use draw::{commitment_for, run_draw, DrawReport};
pub use errors::DrawError;
pub use expand::{expand, format_random, random_at};
pub use seed::{Commitment, CommitmentSeed, Percentile, RandomnessSeed, RawSeed};
pub use shuffle::{
    apply_steps, shuffle, shuffle_in_place, shuffle_steps, swap_index, ShuffleStep,
};
pub use threshold::{address_random, evaluate, Participant, ParticipantOutcome, WinThreshold};
