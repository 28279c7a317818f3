use alloy_primitives::{B256, U256};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::DrawConfig;
use crate::correlate::{correlate, ResultRecord};
use crate::errors::Result;
use crate::expand::{expand, serialize_random_seq};
use crate::seed::{Commitment, CommitmentSeed, RandomnessSeed, RawSeed};
use crate::shuffle::{apply_steps, shuffle_steps, ShuffleStep};

/// Everything a draw produces, ready for publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawReport {
    /// Canonical (zero-padded) block hash used as the randomness seed
    pub block_hash: String,
    pub commitment_hash: B256,
    pub commitment_percentile: String,
    pub items: Vec<u64>,
    /// Item at each final position
    pub permutation: Vec<u64>,
    pub steps: Vec<ShuffleStep>,
    #[serde(serialize_with = "serialize_random_seq")]
    pub random_sequence: Vec<U256>,
    /// Sorted by item
    pub records: Vec<ResultRecord>,
}

/// Decode both commitment seeds and hash them.
pub fn commitment_for(config: &DrawConfig) -> Result<Commitment> {
    let first = RawSeed::from_hex(&config.commitment_seed_hex)?;
    let second = RawSeed::from_base58_payload(&config.commitment_seed_base58)?;
    Ok(CommitmentSeed::combine(&first, &second).commit())
}

/// Run the full pipeline: commitment, shuffle of `1..=item_count`, random
/// expansion and correlation.
///
/// The commitment and the randomness are independent: the shuffle and the
/// random sequence depend only on `block_hash`.
pub fn run_draw(config: &DrawConfig) -> Result<DrawReport> {
    let commitment = commitment_for(config)?;
    let seed = RandomnessSeed::from_hex(&config.block_hash)?;

    let items: Vec<u64> = (1..=u64::from(config.item_count)).collect();
    debug!(count = items.len(), %seed, "starting draw");

    let steps = shuffle_steps(items.len(), &seed)?;
    let permutation = apply_steps(&items, &steps);
    let random_sequence = expand(&seed, config.item_count);
    let records = correlate(&permutation, &random_sequence);

    info!(
        commitment = %commitment.hash(),
        percentile = %commitment.percentile(),
        items = items.len(),
        "draw complete"
    );

    Ok(DrawReport {
        block_hash: seed.to_string(),
        commitment_hash: commitment.hash(),
        commitment_percentile: commitment.percentile().to_string(),
        items,
        permutation,
        steps,
        random_sequence,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DrawError;

    #[test]
    fn test_reference_draw() {
        let report = run_draw(&DrawConfig::default()).unwrap();

        assert_eq!(report.items, vec![1, 2, 3, 4]);
        assert_eq!(report.permutation, vec![3, 1, 2, 4]);
        assert_eq!(report.commitment_percentile, "23.797406");

        let positions: Vec<(u64, u32)> =
            report.records.iter().map(|r| (r.item, r.position)).collect();
        assert_eq!(positions, vec![(1, 1), (2, 2), (3, 0), (4, 3)]);
    }

    #[test]
    fn test_permutation_replays_recorded_steps() {
        let config = DrawConfig {
            item_count: 10,
            ..DrawConfig::default()
        };
        let report = run_draw(&config).unwrap();
        let seed = RandomnessSeed::from_hex(&config.block_hash).unwrap();

        assert_eq!(report.steps, shuffle_steps(10, &seed).unwrap());
        assert_eq!(
            report.permutation,
            crate::shuffle::shuffle(&report.items, &seed).unwrap()
        );
        assert_eq!(report.permutation, vec![3, 9, 2, 4, 10, 1, 7, 8, 5, 6]);
    }

    #[test]
    fn test_empty_draw() {
        let config = DrawConfig {
            item_count: 0,
            ..DrawConfig::default()
        };
        let report = run_draw(&config).unwrap();
        assert!(report.permutation.is_empty());
        assert!(report.random_sequence.is_empty());
        assert!(report.records.is_empty());
    }

    #[test]
    fn test_bad_block_hash_fails_before_output() {
        let config = DrawConfig {
            block_hash: "not hex".to_string(),
            ..DrawConfig::default()
        };
        assert!(matches!(run_draw(&config), Err(DrawError::InvalidHex(_))));
    }

    #[test]
    fn test_report_json_shape() {
        let report = run_draw(&DrawConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(
            json["commitmentHash"],
            "0x3cebde24c5332897eb941ab66bde7c1012c3047840a9cb4d383bda7406eaac09"
        );
        assert_eq!(json["randomSequence"].as_array().unwrap().len(), 4);
        assert_eq!(json["records"][2]["item"], 3);
        assert_eq!(json["steps"][0]["i"], 3);
    }
}
