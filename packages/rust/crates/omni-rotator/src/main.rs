//! omni-rotator CLI: pick, sample, or simulate weighted banner rotation.
//!
//! Catalog from `--catalog`, or `rotation.catalog_path` resolved against `PRJ_ROOT`
//! (default `banners.yaml`).
//! Results are JSON on stdout.
//!
//! Logging: set `RUST_LOG=omni_rotator=debug` to see selection logs on stderr.

mod cli;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing_subscriber::EnvFilter;

use omni_rotator::{
    BannerCatalog, BannerFilter, BannerRotator, RotatorSettings, load_rotator_settings,
    set_config_home_override,
};

use crate::cli::{Cli, Command, SelectionArgs};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("omni_rotator=info,omni_picker=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }
    let settings = load_rotator_settings();

    let output = match cli.command {
        Command::Pick { selection } => {
            let (rotator, filter, mut rng) = prepare(&settings, &selection)?;
            serde_json::to_string_pretty(&rotator.biased_choice(&filter, &mut rng)?)?
        }
        Command::Sample { count, selection } => {
            let count = count.unwrap_or_else(|| settings.default_sample_size());
            let (rotator, filter, mut rng) = prepare(&settings, &selection)?;
            serde_json::to_string_pretty(&rotator.biased_sample(count, &filter, &mut rng)?)?
        }
        Command::Simulate { trials, selection } => {
            let trials = trials.unwrap_or_else(|| settings.simulate_trials());
            let (rotator, filter, mut rng) = prepare(&settings, &selection)?;
            serde_json::to_string_pretty(&rotator.simulate(trials, &filter, &mut rng)?)?
        }
    };
    println!("{output}");
    Ok(())
}

fn prepare(
    settings: &RotatorSettings,
    selection: &SelectionArgs,
) -> anyhow::Result<(BannerRotator<BannerCatalog>, BannerFilter, Box<dyn RngCore>)> {
    let catalog_path = selection
        .catalog
        .clone()
        .unwrap_or_else(|| settings.catalog_path());
    let catalog = BannerCatalog::load(&catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;

    let filter = selection
        .campaign
        .clone()
        .map_or_else(BannerFilter::any, BannerFilter::campaign);

    let rng: Box<dyn RngCore> = match selection.seed.or(settings.rotation.seed) {
        Some(seed) => {
            tracing::debug!(seed, "using seeded rng");
            Box::new(StdRng::seed_from_u64(seed))
        }
        None => Box::new(rand::thread_rng()),
    };

    Ok((BannerRotator::with_defaults(catalog), filter, rng))
}
