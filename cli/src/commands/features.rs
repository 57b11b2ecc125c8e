use std::{fs::File, io::BufWriter};

use anyhow::{Context, Result};
use fra_atlas::{Atlas, SourceStatus};

use crate::cli::FeaturesArgs;

pub fn run(atlas: &Atlas, args: &FeaturesArgs) -> Result<()> {
    let collection = match &args.region {
        Some(name) => atlas.load_region_features(&atlas.region(args.level, name)),
        None => atlas.load_all_features(),
    };

    match collection.status() {
        SourceStatus::Loaded => {}
        SourceStatus::NotRegistered => tracing::warn!("no boundary source registered for this region"),
        SourceStatus::Unavailable => tracing::warn!("boundary source unavailable"),
    }
    tracing::info!(features = collection.len(), skipped = collection.skipped_count(), "collected features");

    let geojson = collection.to_geojson();
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("[features] Failed to create {}", path.display()))?;
            serde_json::to_writer(BufWriter::new(file), &geojson)?;
            tracing::info!(path = %path.display(), "wrote GeoJSON");
        }
        None => println!("{}", serde_json::to_string(&geojson)?),
    }
    Ok(())
}
