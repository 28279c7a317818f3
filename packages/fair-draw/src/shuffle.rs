//! Keyed Fisher-Yates shuffle
//!
//! Step `i` runs from `len - 1` down to `1`. The swap partner is
//! `HMAC-SHA256(seed, be32(i)) mod (i + 1)`, reduced from the full 256-bit
//! digest with no masking.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{DrawError, Result};
use crate::hashing::{digest_to_u256, encode_index, hmac_sha256};
use crate::seed::RandomnessSeed;

/// One swap performed by the shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleStep {
    pub i: u32,
    pub j: u32,
}

/// Swap partner for step `i`, always in `0..=i`.
pub fn swap_index(seed: &RandomnessSeed, i: u32) -> u32 {
    let digest = hmac_sha256(seed.as_bytes(), &encode_index(i));
    let modulus = U256::from(i) + U256::from(1u64);
    let j = digest_to_u256(digest) % modulus;
    // j < i + 1 <= 2^32
    j.as_limbs()[0] as u32
}

/// Swaps performed when shuffling `len` items, in execution order.
pub fn shuffle_steps(len: usize, seed: &RandomnessSeed) -> Result<Vec<ShuffleStep>> {
    let last = last_index(len)?;
    Ok((1..=last)
        .rev()
        .map(|i| ShuffleStep {
            i,
            j: swap_index(seed, i),
        })
        .collect())
}

/// Shuffle `items` in place.
///
/// The slice is mutated; use [`shuffle`] to keep the caller's order intact.
pub fn shuffle_in_place<T>(items: &mut [T], seed: &RandomnessSeed) -> Result<()> {
    let steps = shuffle_steps(items.len(), seed)?;
    swap_all(items, &steps);
    Ok(())
}

/// Replay precomputed `steps` on a copy of `items`.
///
/// `steps` must come from [`shuffle_steps`] for `items.len()`.
pub fn apply_steps<T: Clone>(items: &[T], steps: &[ShuffleStep]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    swap_all(&mut shuffled, steps);
    shuffled
}

fn swap_all<T>(items: &mut [T], steps: &[ShuffleStep]) {
    for step in steps {
        trace!(i = step.i, j = step.j, "shuffle swap");
        items.swap(step.i as usize, step.j as usize);
    }
    debug!(len = items.len(), "shuffled items");
}

/// Return a shuffled copy of `items`.
pub fn shuffle<T: Clone>(items: &[T], seed: &RandomnessSeed) -> Result<Vec<T>> {
    let mut shuffled = items.to_vec();
    shuffle_in_place(&mut shuffled, seed)?;
    Ok(shuffled)
}

/// Highest index that initiates a swap, or 0 when nothing is swapped.
fn last_index(len: usize) -> Result<u32> {
    if len == 0 {
        return Ok(0);
    }
    u32::try_from(len - 1).map_err(|_| DrawError::TooManyItems(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK_HASH: &str = "00000000000000000001e07e0f880e4570ec3b8c6f413c689316b24816901368";

    fn seed() -> RandomnessSeed {
        RandomnessSeed::from_hex(BLOCK_HASH).unwrap()
    }

    #[test]
    fn test_reference_shuffle() {
        let shuffled = shuffle(&[1u64, 2, 3, 4], &seed()).unwrap();
        assert_eq!(shuffled, vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_reference_steps() {
        let steps = shuffle_steps(4, &seed()).unwrap();
        assert_eq!(
            steps,
            vec![
                ShuffleStep { i: 3, j: 3 },
                ShuffleStep { i: 2, j: 1 },
                ShuffleStep { i: 1, j: 0 },
            ]
        );
    }

    #[test]
    fn test_ten_items() {
        let items: Vec<u64> = (1..=10).collect();
        let shuffled = shuffle(&items, &seed()).unwrap();
        assert_eq!(shuffled, vec![3, 9, 2, 4, 10, 1, 7, 8, 5, 6]);
    }

    #[test]
    fn test_empty_and_single() {
        let empty: Vec<u64> = vec![];
        assert!(shuffle(&empty, &seed()).unwrap().is_empty());
        assert!(shuffle_steps(0, &seed()).unwrap().is_empty());

        assert_eq!(shuffle(&[7u64], &seed()).unwrap(), vec![7]);
        assert!(shuffle_steps(1, &seed()).unwrap().is_empty());
    }

    #[test]
    fn test_shuffle_leaves_input_untouched() {
        let items = vec![1u64, 2, 3, 4];
        let _ = shuffle(&items, &seed()).unwrap();
        assert_eq!(items, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_shuffle_in_place_matches_copy() {
        let mut items = vec!["a", "b", "c", "d", "e"];
        let copy = shuffle(&items, &seed()).unwrap();
        shuffle_in_place(&mut items, &seed()).unwrap();
        assert_eq!(items, copy);
    }

    #[test]
    fn test_apply_steps_matches_shuffle() {
        let items: Vec<u64> = (1..=10).collect();
        let steps = shuffle_steps(items.len(), &seed()).unwrap();
        assert_eq!(
            apply_steps(&items, &steps),
            shuffle(&items, &seed()).unwrap()
        );
        assert_eq!(items, (1..=10).collect::<Vec<u64>>());
    }

    #[test]
    fn test_swap_index_range() {
        let seed = seed();
        for i in 1..200u32 {
            assert!(swap_index(&seed, i) <= i);
        }
        assert_eq!(swap_index(&seed, 0), 0);
    }

    #[test]
    fn test_different_seed_changes_permutation() {
        let other = RandomnessSeed::from_hex("01").unwrap();
        let items: Vec<u64> = (1..=10).collect();
        assert_ne!(
            shuffle(&items, &seed()).unwrap(),
            shuffle(&items, &other).unwrap()
        );
    }
}
