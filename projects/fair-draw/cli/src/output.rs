//! Text and JSON rendering of draw results.

use alloy_primitives::hex;
use anyhow::Result;
use fair_draw::{format_random, DrawReport, ParticipantOutcome, RandomnessSeed, WinThreshold};
use serde::Serialize;

pub fn print_draw(report: &DrawReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Block hash: {}", report.block_hash);
    println!("Commitment hash: {}", hex::encode(report.commitment_hash));
    println!("Commitment percentile: {}%", report.commitment_percentile);
    println!();
    println!("Results (sorted by item):");
    for record in &report.records {
        println!(
            "Item {}: position {}, random value {}",
            record.item,
            record.position,
            format_random(&record.random_value)
        );
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThresholdAudit<'a> {
    block_hash: String,
    threshold: String,
    threshold_percent: String,
    total_players: u64,
    coefficient: String,
    winners_count: usize,
    random_numbers: &'a [ParticipantOutcome],
}

pub fn print_threshold(
    seed: &RandomnessSeed,
    threshold: &WinThreshold,
    outcomes: &[ParticipantOutcome],
    json: bool,
) -> Result<()> {
    let winners: Vec<&ParticipantOutcome> = outcomes.iter().filter(|o| o.is_winner).collect();

    if json {
        let audit = ThresholdAudit {
            block_hash: seed.to_string(),
            threshold: format_random(&threshold.threshold()),
            threshold_percent: format!("{}%", threshold.percent()),
            total_players: threshold.participants(),
            coefficient: threshold.coefficient_display(),
            winners_count: winners.len(),
            random_numbers: outcomes,
        };
        println!("{}", serde_json::to_string_pretty(&audit)?);
        return Ok(());
    }

    println!("Block hash: {seed}");
    println!("Participants: {}", threshold.participants());
    println!("Coefficient: {}", threshold.coefficient_display());
    println!("Win threshold: {}", format_random(&threshold.threshold()));
    println!("Win threshold (%): {} %", threshold.percent());
    println!("Winners: {}", winners.len());
    for winner in winners {
        println!(
            "#{} {} {}",
            winner.number,
            winner.player,
            format_random(&winner.random_value)
        );
    }
    Ok(())
}
