use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use packsim_core::PackRequest;

#[derive(Parser, Debug, Clone)]
#[command(name = "packsim", version, about = "Open simulated card packs", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open packs once and print them
    Open(OpenArgs),
    /// Open packs many times in parallel and report drop statistics
    Simulate(SimulateArgs),
}

/// Reference data and session state shared by every command
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Card catalog (flat array or keyed by rarity)
    #[arg(long, default_value = "cards/catalog.json")]
    pub catalog: PathBuf,

    /// Format cap tables
    #[arg(long, default_value = "cards/formats.json")]
    pub formats: PathBuf,

    /// Format whose caps apply
    #[arg(short, long, default_value = "standard")]
    pub format: String,

    /// Partner card id; only cards sharing one of its elements are offered
    #[arg(short, long)]
    pub partner: Option<String>,

    /// Existing collection export used as the session baseline
    #[arg(long)]
    pub collection: Option<PathBuf>,

    /// RNG seed (defaults to the current time)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Slot layout of each pack
#[derive(Args, Debug, Clone)]
pub struct PackArgs {
    /// Rare slots per pack
    #[arg(long, default_value_t = 1)]
    pub rare: u32,

    /// Percent chance that a rare slot is Ultra Rare
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub ultra_rate: u32,

    /// Uncommon slots per pack
    #[arg(long, default_value_t = 3)]
    pub uncommon: u32,

    /// Common slots per pack
    #[arg(long, default_value_t = 6)]
    pub common: u32,

    /// Packs per opening
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub packs: u32,
}

impl PackArgs {
    pub fn request(&self) -> PackRequest {
        PackRequest::new(self.rare, self.ultra_rate, self.uncommon, self.common)
            .with_packs(self.packs)
    }
}

#[derive(Args, Debug, Clone)]
pub struct OpenArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub pack: PackArgs,

    /// Print the opening as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write the collection, with this opening merged in, to a file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Name of the exported collection
    #[arg(long, default_value = "Simulated Collection")]
    pub name: String,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub pack: PackArgs,

    /// Independent openings to run
    #[arg(short, long, default_value_t = 10_000)]
    pub trials: u64,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
