use anyhow::Result;
use fra_atlas::{Atlas, MapView};

use crate::cli::BoundsArgs;

pub fn run(atlas: &Atlas, args: &BoundsArgs) -> Result<()> {
    let region = atlas.region(args.level, &args.region);
    let features = atlas.load_region_features(&region);

    match atlas.view_for(&region, &features) {
        MapView::Fit(bounds) => println!("{}", serde_json::to_string(&bounds)?),
        view => {
            tracing::warn!(region = %region, "no features to fit");
            if let Some((center, zoom)) = view.center_zoom() {
                println!("{}", serde_json::json!({ "center": center, "zoom": zoom }));
            }
        }
    }
    Ok(())
}
