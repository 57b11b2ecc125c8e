mod cli;
mod commands;
mod logging;

use anyhow::Result;
use fra_atlas::{Atlas, AtlasConfig};

use cli::{Cli, Commands};
use commands::{bounds, district, features, regions, stats};

fn open_atlas(cli: &Cli) -> Result<Atlas> {
    let config = match &cli.config {
        Some(path) => AtlasConfig::load(path)?,
        None => AtlasConfig::default(),
    };
    Atlas::open(&config)
}

pub fn run() -> Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let atlas = open_atlas(&cli)?;
    match &cli.command {
        Commands::Features(args) => features::run(&atlas, args),
        Commands::Stats(args) => stats::run(&atlas, args),
        Commands::Bounds(args) => bounds::run(&atlas, args),
        Commands::District(args) => district::run(&atlas, args),
        Commands::Regions => regions::run(&atlas),
    }
}

fn main() -> Result<()> { run() }
