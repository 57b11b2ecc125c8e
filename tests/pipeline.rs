use std::sync::Arc;

use fra_atlas::{
    Atlas, AtlasConfig, DiskSource, MemSource, Provenance, RegionLevel, SourceStatus,
    NOTE_CENSUS_OVERFLOW, NOTE_NO_DATA,
};

const SQUARE_20_24: &str = "\"{'type': 'Polygon', 'coordinates': [[[78.0, 20.0], [82.0, 20.0], [82.0, 24.0], [78.0, 24.0], [78.0, 20.0]]]}\"";
const SMALL_ODISHA: &str = "\"{'type': 'Polygon', 'coordinates': [[[84.0, 20.0], [85.0, 20.0], [85.0, 21.0], [84.0, 20.0]]]}\"";

fn boundary_csv(rows: &[(&str, &str)]) -> String {
    let mut csv = String::from("id,shapes\n");
    for (id, shapes) in rows {
        csv.push_str(&format!("{id},{shapes}\n"));
    }
    csv
}

fn atlas(source: MemSource) -> Atlas {
    Atlas::with_source(AtlasConfig::default(), Arc::new(source)).unwrap()
}

fn fixture() -> MemSource {
    MemSource::new()
        .with("MadhyaPradesh.csv", boundary_csv(&[("mp-1", SQUARE_20_24)]))
        .with("Odisha.csv", boundary_csv(&[("od-1", SMALL_ODISHA), ("od-2", "\"{'type': 'Polygon'}\""), ("od-3", "not json")]))
        .with("Tripura.csv", "id,shapes\n")
        .with(
            "Census_AllStates.csv",
            "State,District_Code,Name,Households,Population_Persons,Area_sq_km\n\
             Odisha,001,Bargarh,100,400,50\n\
             Odisha,002,Jharsuguda,50,200,50\n",
        )
        .with(
            "forest_data.csv",
            "State,Total_Forest_Cover,Percentage_of_GA,Change_in_Forest_Cover\nOdisha,51619,33.15,537\n",
        )
}

#[test]
fn loading_is_idempotent() {
    let atlas = atlas(fixture());
    let odisha = atlas.region(RegionLevel::State, "Odisha");
    let first = atlas.load_region_features(&odisha);
    let second = atlas.load_region_features(&odisha);
    assert_eq!(first, second);
    assert_eq!(first.to_geojson(), second.to_geojson());
}

#[test]
fn malformed_rows_are_skipped_not_fatal() {
    let atlas = atlas(fixture());
    let features = atlas.load_region_features(&atlas.region(RegionLevel::State, "Odisha"));
    assert_eq!(features.status(), SourceStatus::Loaded);
    assert_eq!(features.len(), 1);
    assert_eq!(features.skipped_count(), 2);
    assert_eq!(features.features()[0].id, "od-1");
}

#[test]
fn alias_spellings_converge() {
    let source = fixture().with(
        "Census_AllStates.csv",
        "State,Name,Households,Population_Persons,Area_sq_km\nTelengana,Adilabad,10,100,4\nTelangana,Nizamabad,20,200,6\n",
    );
    let atlas = atlas(source);

    let spellings = ["Telengana", "teleangana", "Telangana"];
    let regions: Vec<_> = spellings.iter().map(|name| atlas.region(RegionLevel::State, name)).collect();
    assert!(regions.windows(2).all(|pair| pair[0] == pair[1]));

    let stats: Vec<_> = regions.iter().map(|region| atlas.region_statistics(region)).collect();
    assert!(stats.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(stats[0].households, Some(30));
    assert_eq!(stats[0].density_per_sq_km, Some(30.0));
    assert_eq!(stats[0].census, Provenance::Matched);
}

#[test]
fn bounds_cover_every_ring() {
    let atlas = atlas(fixture());
    let features = atlas.load_region_features(&atlas.region(RegionLevel::State, "mp"));
    let bounds = features.bounds().unwrap();
    assert_eq!(bounds.south_west, (20.0, 78.0));
    assert_eq!(bounds.north_east, (24.0, 82.0));

    let geojson = features.to_geojson();
    assert_eq!(geojson["type"], "FeatureCollection");
    assert_eq!(geojson["features"][0]["type"], "Feature");
    assert_eq!(geojson["features"][0]["geometry"]["type"], "Polygon");
    assert_eq!(geojson["features"][0]["properties"]["state"], "Madhya Pradesh");
}

#[test]
fn missing_statistics_are_flagged_not_zeroed() {
    let atlas = atlas(fixture());
    let stats = atlas.region_statistics(&atlas.region(RegionLevel::State, "Bihar"));
    assert_eq!(stats.census, Provenance::Missing);
    assert_eq!(stats.forest, Provenance::Missing);
    assert_eq!(stats.households, None);
    assert_eq!(stats.population_total, None);
    assert_eq!(stats.area_sq_km, None);
    assert_eq!(stats.density_per_sq_km, None);
    assert_eq!(stats.forest_cover_sq_km, None);
    assert_eq!(stats.source_note.as_deref(), Some(NOTE_NO_DATA));
}

#[test]
fn concatenation_order_is_stable() {
    let atlas = atlas(fixture());
    let ids = |atlas: &Atlas| -> Vec<String> {
        atlas.load_all_features().features().iter().map(|f| f.id.clone()).collect()
    };
    let first = ids(&atlas);
    assert_eq!(first, ["mp-1", "od-1"]);
    for _ in 0..5 {
        assert_eq!(ids(&atlas), first);
    }

    let all = atlas.load_all_features();
    let statuses: Vec<_> = all.loads().iter().map(|load| load.status).collect();
    assert_eq!(
        statuses,
        [SourceStatus::Loaded, SourceStatus::Loaded, SourceStatus::Unavailable, SourceStatus::Loaded]
    );
    assert_eq!(all.bounds().map(|b| b.north_east), Some((24.0, 85.0)));
}

#[test]
fn empty_source_has_no_bounds() {
    let atlas = atlas(fixture());
    let tripura = atlas.load_region_features(&atlas.region(RegionLevel::State, "tripra"));
    assert_eq!(tripura.status(), SourceStatus::Loaded);
    assert!(tripura.is_empty());
    assert_eq!(tripura.bounds(), None);
    assert!(tripura.to_geojson().get("bbox").is_none());
}

#[test]
fn three_signals_stay_distinct() {
    let atlas = atlas(fixture());

    // Zero features: source read fine.
    let empty = atlas.load_region_features(&atlas.region(RegionLevel::State, "Tripura"));
    assert_eq!(empty.status(), SourceStatus::Loaded);

    // Source unavailable: Telangana is registered but its table is absent.
    let telangana = atlas.region(RegionLevel::State, "Telangana");
    assert_eq!(atlas.load_region_features(&telangana).status(), SourceStatus::Unavailable);
    assert_eq!(
        atlas.load_region_features(&atlas.region(RegionLevel::State, "Goa")).status(),
        SourceStatus::NotRegistered
    );

    // Approximate data: no Telangana census rows, but the fallback table has it.
    let stats = atlas.region_statistics(&telangana);
    assert!(stats.is_approximate());
    assert_eq!(stats.census, Provenance::Approximate);
    assert!(stats.source_note.is_some());
}

#[test]
fn disk_source_reads_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Odisha.csv"), boundary_csv(&[("od-1", SMALL_ODISHA)])).unwrap();
    std::fs::write(dir.path().join("Census_AllStates.csv"), "State,Households\nOdisha,5\n").unwrap();

    let config = AtlasConfig { data_dir: dir.path().to_path_buf(), ..AtlasConfig::default() };
    let atlas = Atlas::open(&config).unwrap();
    let odisha = atlas.region(RegionLevel::State, "ODISHA");
    assert_eq!(atlas.load_region_features(&odisha).len(), 1);
    assert_eq!(atlas.region_statistics(&odisha).households, Some(5));

    let direct = Atlas::with_source(config.clone(), Arc::new(DiskSource::new(dir.path()))).unwrap();
    assert_eq!(direct.load_all_features().len(), 1);
}

#[test]
fn village_statistics_carry_claims_and_no_data_note() {
    let source = fixture().with(
        "claims.csv",
        "id,state,district,village,status\n1,Odisha,Bargarh,Khatiya,approved\n2,Odisha,Bargarh,Khatiya,rejected\n3,Odisha,Bargarh,Bamhani,pending\n",
    );
    let config = AtlasConfig { claims_source: Some("claims.csv".into()), ..AtlasConfig::default() };
    let atlas = Atlas::with_source(config, Arc::new(source)).unwrap();

    let village = atlas.region(RegionLevel::Village, "khatiya");
    let stats = atlas.region_statistics(&village);
    assert!(stats.is_missing());
    assert_eq!(stats.source_note.as_deref(), Some(NOTE_NO_DATA));
    let claims = stats.claims.unwrap();
    assert_eq!((claims.total, claims.approved, claims.rejected, claims.pending), (2, 1, 1, 0));
}

#[test]
fn oversized_census_counts_do_not_panic() {
    let source = fixture().with(
        "Census_AllStates.csv",
        "State,Households,Population_Persons\nOdisha,18446744073709551615,10\nOdisha,1,5\n",
    );
    let atlas = atlas(source);
    let stats = atlas.region_statistics(&atlas.region(RegionLevel::State, "Odisha"));
    assert_eq!(stats.households, None);
    assert_eq!(stats.population_total, Some(15));
    assert!(stats.source_note.as_deref().is_some_and(|note| note.contains(NOTE_CENSUS_OVERFLOW)));
}
