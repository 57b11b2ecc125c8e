use std::path::PathBuf;

use fra_atlas::RegionLevel;

/// Forest-rights atlas CLI
#[derive(clap::Parser, Debug)]
#[command(name = "fra-atlas", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Atlas config file (JSON); defaults to ./data with built-in assets
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Export region boundaries as GeoJSON
    Features(FeaturesArgs),

    /// Print merged statistics for a region
    Stats(StatsArgs),

    /// Print map-fit bounds for a region
    Bounds(BoundsArgs),

    /// Look up a census district by code
    District(DistrictArgs),

    /// List supported regions and whether their sources exist
    Regions,
}

#[derive(clap::Args, Debug)]
pub struct FeaturesArgs {
    /// Region name; every supported region when omitted
    #[arg(short, long)]
    pub region: Option<String>,

    /// Region level (state, district, village)
    #[arg(short, long, default_value = "state")]
    pub level: RegionLevel,

    /// Output GeoJSON file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// Region name, e.g. "Odisha"
    pub region: String,

    /// Region level (state, district)
    #[arg(short, long, default_value = "state")]
    pub level: RegionLevel,
}

#[derive(clap::Args, Debug)]
pub struct BoundsArgs {
    /// Region name, e.g. "Odisha"
    pub region: String,

    #[arg(short, long, default_value = "state")]
    pub level: RegionLevel,
}

#[derive(clap::Args, Debug)]
pub struct DistrictArgs {
    /// District code, e.g. 7 or 007
    pub code: String,
}
