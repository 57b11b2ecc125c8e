use anyhow::{bail, Result};
use fra_atlas::Atlas;

use crate::cli::DistrictArgs;

pub fn run(atlas: &Atlas, args: &DistrictArgs) -> Result<()> {
    let Some(record) = atlas.district_by_code(&args.code) else {
        bail!("[district] No census row for district code {}", args.code);
    };
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
