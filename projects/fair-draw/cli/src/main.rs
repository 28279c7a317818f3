//! Fair Draw CLI - run and audit provably fair draws.
//!
//! # Usage
//!
//! ```bash
//! # Reference draw (compiled-in seeds, 4 items)
//! fair-draw
//!
//! # Custom block hash and population, JSON output
//! fair-draw --block-hash 0000...1368 --items 10 --json
//!
//! # Address lottery against a win threshold
//! fair-draw threshold --coefficient 0x28A2587C9E58000 --participants players.json
//! ```
//!
//! Each draw flag falls back to its `FAIR_DRAW_*` environment variable;
//! anything still unset comes from `--config <file>` or the reference defaults.

mod cli;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Initialize tracing subscriber with environment-based filtering.
///
/// - `quiet`: Suppress all logging output
/// - `verbose`: Enable debug-level logging
fn init_tracing(quiet: bool, verbose: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.quiet, cli.verbose);

    cli.run()
}
