//! `drugline generate` - append synthetic drugs to an export

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// First numeric id to generate (inclusive)
    pub first_id: u32,

    /// Last numeric id to generate (inclusive)
    pub last_id: u32,

    /// Output XML file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Source export (default: from config)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// RNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: GenerateArgs, config: &Config) -> Result<()> {
    if args.first_id > args.last_id {
        log::warn!(
            "Empty id range {}..={}, output will match input",
            args.first_id,
            args.last_id
        );
    }
    let input = args.input.unwrap_or_else(|| config.drugbank.input.clone());
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let count = drugline_drugbank::generator::generate_random(
        args.first_id,
        args.last_id,
        &input,
        &args.output,
        &config.namespace(),
        &mut rng,
    )
    .with_context(|| format!("Failed to generate from {}", input.display()))?;

    eprintln!("Generated {count} drugs into {}", args.output.display());
    Ok(())
}
