use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "omni-rotator")]
#[command(about = "Weighted banner rotation: pick, sample, or simulate from a banner catalog.")]
pub(crate) struct Cli {
    /// Override the config home directory (absolute, or relative to `PRJ_ROOT`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub(crate) struct SelectionArgs {
    /// Banner catalog (YAML, or JSON by extension). Default: settings or banners.yaml
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,

    /// Restrict to one campaign slug
    #[arg(long)]
    pub(crate) campaign: Option<String>,

    /// Seed for reproducible output (default: settings, else thread RNG)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Pick one active banner by weight.
    Pick {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Pick several distinct active banners, in draw order.
    Sample {
        /// Number of banners (default: settings, else 3)
        #[arg(long)]
        count: Option<usize>,

        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Run many picks and compare observed to expected shares.
    Simulate {
        /// Number of picks (default: settings, else 10000)
        #[arg(long)]
        trials: Option<usize>,

        #[command(flatten)]
        selection: SelectionArgs,
    },
}
