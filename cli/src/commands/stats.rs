use anyhow::Result;
use fra_atlas::Atlas;

use crate::cli::StatsArgs;

pub fn run(atlas: &Atlas, args: &StatsArgs) -> Result<()> {
    let region = atlas.region(args.level, &args.region);
    let stats = atlas.region_statistics(&region);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
