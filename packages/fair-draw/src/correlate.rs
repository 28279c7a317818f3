use alloy_primitives::U256;
use serde::Serialize;

use crate::expand::serialize_random;

/// Final outcome for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    /// Original item identity
    pub item: u64,
    /// Position assigned by the shuffle
    pub position: u32,
    /// Random value drawn for that position
    #[serde(rename = "randomValue", serialize_with = "serialize_random")]
    pub random_value: U256,
}

/// Pair each shuffled position with the random value at that position,
/// ordered by item identity.
///
/// # Panics
/// If `permutation` and `randoms` differ in length.
pub fn correlate(permutation: &[u64], randoms: &[U256]) -> Vec<ResultRecord> {
    assert_eq!(
        permutation.len(),
        randoms.len(),
        "permutation and random sequence must have the same length"
    );

    let mut records: Vec<ResultRecord> = permutation
        .iter()
        .zip(randoms)
        .enumerate()
        .map(|(position, (item, random_value))| ResultRecord {
            item: *item,
            position: u32::try_from(position)
                .expect("positions are indexed with 32-bit integers"),
            random_value: *random_value,
        })
        .collect();

    records.sort_by_key(|record| record.item);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_by_item() {
        let randoms = vec![U256::from(10u64), U256::from(11u64), U256::from(12u64)];
        let records = correlate(&[3, 1, 2], &randoms);

        assert_eq!(
            records,
            vec![
                ResultRecord {
                    item: 1,
                    position: 1,
                    random_value: U256::from(11u64)
                },
                ResultRecord {
                    item: 2,
                    position: 2,
                    random_value: U256::from(12u64)
                },
                ResultRecord {
                    item: 3,
                    position: 0,
                    random_value: U256::from(10u64)
                },
            ]
        );
    }

    #[test]
    fn test_position_is_index_in_permutation() {
        let permutation: Vec<u64> = (0..300u64).rev().collect();
        let randoms: Vec<U256> = (0..300u64).map(U256::from).collect();
        let records = correlate(&permutation, &randoms);

        for record in &records {
            assert_eq!(permutation[record.position as usize], record.item);
            assert_eq!(record.random_value, U256::from(record.position));
        }
        assert_eq!(records[0].position, 299);
    }

    #[test]
    fn test_empty() {
        assert!(correlate(&[], &[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_length_mismatch_panics() {
        correlate(&[1, 2], &[U256::ZERO]);
    }

    #[test]
    fn test_serialized_form() {
        let records = correlate(&[5], &[U256::from(255u64)]);
        let json = serde_json::to_value(&records).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "item": 5,
                "position": 0,
                "randomValue": format!("0x{}ff", "0".repeat(62)),
            }])
        );
    }
}
