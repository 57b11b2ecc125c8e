use anyhow::Result;
use fra_atlas::Atlas;

pub fn run(atlas: &Atlas) -> Result<()> {
    let registry = atlas.registry();
    for region in registry.supported() {
        let Some(entry) = registry.entry(region) else { continue };
        let status = if registry.is_available(region) { "available" } else { "missing" };
        println!("{:<8} {:<20} {:<24} {}", region.level().to_str(), entry.name, entry.source, status);
    }
    Ok(())
}
