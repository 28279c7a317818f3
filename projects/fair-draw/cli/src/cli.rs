use std::fs;
use std::path::PathBuf;

use alloy_primitives::B256;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fair_draw::threshold::parse_coefficient;
use fair_draw::{evaluate, run_draw, DrawConfig, Participant, RandomnessSeed, WinThreshold};
use tracing::{info, warn};

use crate::output;

#[derive(Parser, Debug)]
#[command(name = "fair-draw", version, about = "Provably fair draws seeded by a block hash")]
pub struct Cli {
    #[command(flatten)]
    pub draw: DrawArgs,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct DrawArgs {
    /// JSON file with draw configuration; flags and their environment variables override it
    #[arg(long, global = true, env = "FAIR_DRAW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Block hash keying the shuffle and random values (hex, zero-padded to 32 bytes)
    #[arg(long, global = true, env = "FAIR_DRAW_BLOCK_HASH")]
    pub block_hash: Option<String>,

    /// Draw a fresh random block hash instead (dry runs only)
    #[arg(long, global = true, conflicts_with = "block_hash")]
    pub random_block_hash: bool,

    /// First commitment seed (hex)
    #[arg(long, env = "FAIR_DRAW_COMMITMENT_SEED_HEX")]
    pub seed_hex: Option<String>,

    /// Second commitment seed (base58 with version byte and checksum)
    #[arg(long, env = "FAIR_DRAW_COMMITMENT_SEED_BASE58")]
    pub seed_base58: Option<String>,

    /// Number of items to shuffle
    #[arg(long, env = "FAIR_DRAW_ITEM_COUNT")]
    pub items: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mark winners among base58-addressed participants
    Threshold(ThresholdArgs),
}

#[derive(Args, Debug)]
pub struct ThresholdArgs {
    /// Expected winners scaled by 10^15 (hex with 0x prefix, or decimal)
    #[arg(long)]
    pub coefficient: String,

    /// JSON array of {"number": .., "player": "<base58>"}
    #[arg(long)]
    pub participants: PathBuf,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = self.draw.resolve()?;

        match self.command {
            None => {
                let report = run_draw(&config).context("draw failed")?;
                output::print_draw(&report, self.json)
            }
            Some(Command::Threshold(args)) => {
                let seed = RandomnessSeed::from_hex(&config.block_hash)
                    .context("invalid block hash")?;
                let coefficient = parse_coefficient(&args.coefficient)?;

                let raw = fs::read_to_string(&args.participants).with_context(|| {
                    format!("failed to read {}", args.participants.display())
                })?;
                let participants: Vec<Participant> =
                    serde_json::from_str(&raw).context("failed to parse participants")?;
                info!(count = participants.len(), "loaded participants");

                let threshold = WinThreshold::new(coefficient, participants.len() as u64)?;
                let outcomes = evaluate(&seed, &participants, &threshold)?;
                output::print_threshold(&seed, &threshold, &outcomes, self.json)
            }
        }
    }
}

impl DrawArgs {
    /// Config file or reference defaults first, then flags. Each flag falls
    /// back to its `FAIR_DRAW_*` variable, so the environment is read by clap.
    pub fn resolve(&self) -> Result<DrawConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                DrawConfig::from_json(&raw)?
            }
            None => DrawConfig::default(),
        };

        if let Some(block_hash) = &self.block_hash {
            config.block_hash = block_hash.clone();
        }
        if self.random_block_hash {
            let hash = B256::from(rand::random::<[u8; 32]>());
            config.block_hash = RandomnessSeed::new(hash).to_string();
            warn!(block_hash = %config.block_hash, "using a random block hash");
        }
        if let Some(seed_hex) = &self.seed_hex {
            config.commitment_seed_hex = seed_hex.clone();
        }
        if let Some(seed_base58) = &self.seed_base58 {
            config.commitment_seed_base58 = seed_base58.clone();
        }
        if let Some(items) = self.items {
            config.item_count = items;
        }

        Ok(config)
    }
}
