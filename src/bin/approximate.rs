use anyhow::Result;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use restaurant_geocoder::{cli, run, TableResolver};

/// Give restaurants approximate coordinates based on known São Paulo
/// neighbourhoods and streets.
#[derive(Debug, Parser)]
struct Cli {
    #[command(flatten)]
    paths: cli::PathArgs,
    /// Seed the jitter for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    cli::init_logging();
    let cli = Cli::parse();

    let rng = match cli.seed {
        Some(x) => StdRng::seed_from_u64(x),
        None => StdRng::from_entropy(),
    };
    let mut resolver = TableResolver::sao_paulo(rng);
    run(&cli.paths.config(), &mut resolver)?;

    Ok(())
}
