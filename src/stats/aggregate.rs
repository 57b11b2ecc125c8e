use serde::Serialize;

use crate::region::{AliasTable, RegionId};
use super::{
    census::{CensusRecord, CensusTable},
    claims::{ClaimTable, ClaimTally},
    fallback::{ApproximateTable, Provenance, Resolved},
    forest::{ForestCover, ForestTable},
    values::{sum_counts, sum_present},
};

pub const NOTE_APPROX_CENSUS: &str = "approximate census data used";
pub const NOTE_APPROX_FOREST: &str = "approximate forest-cover data used";
pub const NOTE_NO_CENSUS: &str = "no census data found";
pub const NOTE_NO_FOREST: &str = "no forest-cover data found";
pub const NOTE_NO_DATA: &str = "no data found";
pub const NOTE_CENSUS_OVERFLOW: &str = "census totals out of range";

/// Merged statistics for one region.
///
/// Numeric fields are `None` when no source provided a value; a missing
/// figure is never reported as zero. `census` and `forest` record which link
/// of the fallback chain each group came from, and `source_note` is set
/// whenever either group is degraded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStatistics {
    pub region: RegionId,
    pub district_count: Option<u64>,
    pub households: Option<u64>,
    pub population_total: Option<u64>,
    pub population_male: Option<u64>,
    pub population_female: Option<u64>,
    pub area_sq_km: Option<f64>,
    pub density_per_sq_km: Option<f64>,
    pub forest_cover_sq_km: Option<f64>,
    pub forest_cover_percent: Option<f64>,
    pub forest_cover_change_sq_km: Option<f64>,
    pub claims: Option<ClaimTally>,
    pub census: Provenance,
    pub forest: Provenance,
    pub source_note: Option<String>,
}

impl RegionStatistics {
    /// Whether any figure came from the approximate table.
    pub fn is_approximate(&self) -> bool {
        self.census == Provenance::Approximate || self.forest == Provenance::Approximate
    }

    /// Whether neither census nor forest data exists for the region.
    pub fn is_missing(&self) -> bool {
        self.census == Provenance::Missing && self.forest == Provenance::Missing
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct CensusTotals {
    district_count: Option<u64>,
    households: Option<u64>,
    population_total: Option<u64>,
    population_male: Option<u64>,
    population_female: Option<u64>,
    area_sq_km: Option<f64>,
    /// A count total overflowed and was dropped.
    overflowed: bool,
}

impl CensusTotals {
    fn has_figures(&self) -> bool {
        self.households.is_some()
            || self.population_total.is_some()
            || self.population_male.is_some()
            || self.population_female.is_some()
            || self.area_sq_km.is_some()
            || self.overflowed
    }
}

/// Population density, unknown when the area is missing or not positive.
fn density(population: Option<u64>, area_sq_km: Option<f64>) -> Option<f64> {
    let area = area_sq_km.filter(|a| *a > 0.0)?;
    Some(population? as f64 / area)
}

/// Merges census, forest-cover and claim tables into per-region statistics.
pub struct StatisticsAggregator<'a> {
    aliases: &'a AliasTable,
    census: &'a CensusTable,
    forest: &'a ForestTable,
    claims: Option<&'a ClaimTable>,
    approximate: &'a ApproximateTable,
}

impl<'a> StatisticsAggregator<'a> {
    pub fn new(
        aliases: &'a AliasTable,
        census: &'a CensusTable,
        forest: &'a ForestTable,
        approximate: &'a ApproximateTable,
    ) -> Self {
        Self { aliases, census, forest, claims: None, approximate }
    }

    pub fn with_claims(mut self, claims: &'a ClaimTable) -> Self {
        self.claims = Some(claims);
        self
    }

    /// Build the statistics record for `region`. Always yields a record;
    /// missing or approximate data is reported through `source_note`.
    pub fn aggregate(&self, region: &RegionId) -> RegionStatistics {
        let census = Resolved::chain(self.matched_census(region), || {
            self.approximate.census(region).map(|approx| CensusTotals {
                district_count: approx.districts,
                households: approx.households,
                population_total: approx.population,
                area_sq_km: approx.area_sq_km,
                ..CensusTotals::default()
            })
        });
        let forest = Resolved::chain(
            self.forest.find(region, self.aliases).map(|record| record.cover),
            || self.approximate.forest(region).copied(),
        );

        let totals = census.value().copied().unwrap_or_default();
        let cover: ForestCover = forest.value().copied().unwrap_or_default();
        let source_note = source_note(census.provenance(), forest.provenance(), totals.overflowed);

        if let Some(note) = &source_note {
            tracing::info!(region = %region, note = %note, "statistics degraded");
        }

        RegionStatistics {
            region: region.clone(),
            district_count: totals.district_count,
            households: totals.households,
            population_total: totals.population_total,
            population_male: totals.population_male,
            population_female: totals.population_female,
            area_sq_km: totals.area_sq_km,
            density_per_sq_km: density(totals.population_total, totals.area_sq_km),
            forest_cover_sq_km: cover.cover_sq_km,
            forest_cover_percent: cover.cover_percent,
            forest_cover_change_sq_km: cover.change_sq_km,
            claims: self.claims.map(|claims| claims.tally(region, self.aliases)),
            census: census.provenance(),
            forest: forest.provenance(),
            source_note,
        }
    }

    /// Totals over matched census rows. Rows that match but carry no
    /// figures count as no match, so the fallback chain continues.
    fn matched_census(&self, region: &RegionId) -> Option<CensusTotals> {
        let rows = self.census.matching(region, self.aliases);
        if rows.is_empty() { return None }

        let mut overflowed = false;
        let mut counts = |field: fn(&CensusRecord) -> Option<u64>| {
            sum_counts(rows.iter().copied().map(field)).unwrap_or_else(|e| {
                tracing::warn!(region = %region, error = %e, "dropping census total");
                overflowed = true;
                None
            })
        };
        let households = counts(|r| r.households);
        let population_total = counts(|r| r.population_total);
        let population_male = counts(|r| r.population_male);
        let population_female = counts(|r| r.population_female);

        let totals = CensusTotals {
            district_count: Some(rows.len() as u64),
            households,
            population_total,
            population_male,
            population_female,
            area_sq_km: sum_present(rows.iter().map(|r| r.area_sq_km)),
            overflowed,
        };
        totals.has_figures().then_some(totals)
    }
}

fn source_note(census: Provenance, forest: Provenance, overflowed: bool) -> Option<String> {
    if census == Provenance::Missing && forest == Provenance::Missing {
        return Some(NOTE_NO_DATA.to_string());
    }

    let notes: Vec<&str> = [
        match census {
            Provenance::Matched => None,
            Provenance::Approximate => Some(NOTE_APPROX_CENSUS),
            Provenance::Missing => Some(NOTE_NO_CENSUS),
        },
        match forest {
            Provenance::Matched => None,
            Provenance::Approximate => Some(NOTE_APPROX_FOREST),
            Provenance::Missing => Some(NOTE_NO_FOREST),
        },
        overflowed.then_some(NOTE_CENSUS_OVERFLOW),
    ].into_iter().flatten().collect();

    (!notes.is_empty()).then(|| notes.join("; "))
}

#[cfg(test)]
mod tests {
    use crate::io::csv::read_csv_rows_bytes;
    use crate::region::RegionLevel;
    use super::*;

    const CENSUS: &str = "\
State,District_Code,Name,Households,Population_Persons,Population_Males,Population_Females,Area_sq_km
Odisha,001,Bargarh,100,400,210,190,50
Odisha,002,Jharsuguda,50,200,,,0
Madhya Pradesh,003,Mandla,10,0,,,
";

    const FOREST: &str = "\
State,Total_Forest_Cover,Percentage_of_GA,Change_in_Forest_Cover
Odisha,51619,33.15,537
";

    struct Fixture {
        aliases: AliasTable,
        census: CensusTable,
        forest: ForestTable,
        approximate: ApproximateTable,
    }

    impl Fixture {
        fn new() -> Self {
            let aliases = AliasTable::builtin().unwrap();
            Self {
                census: CensusTable::from_rows(&read_csv_rows_bytes(CENSUS.as_bytes()).unwrap()),
                forest: ForestTable::from_rows(&read_csv_rows_bytes(FOREST.as_bytes()).unwrap()),
                approximate: ApproximateTable::builtin(&aliases).unwrap(),
                aliases,
            }
        }

        fn stats(&self, level: RegionLevel, name: &str) -> RegionStatistics {
            let region = RegionId::resolve(level, name, &self.aliases);
            StatisticsAggregator::new(&self.aliases, &self.census, &self.forest, &self.approximate)
                .aggregate(&region)
        }
    }

    #[test]
    fn sums_matched_rows() {
        let stats = Fixture::new().stats(RegionLevel::State, "odisa");
        assert_eq!(stats.district_count, Some(2));
        assert_eq!(stats.households, Some(150));
        assert_eq!(stats.population_total, Some(600));
        assert_eq!(stats.population_male, Some(210));
        assert_eq!(stats.area_sq_km, Some(50.0));
        assert_eq!(stats.density_per_sq_km, Some(12.0));
        assert_eq!(stats.forest_cover_percent, Some(33.15));
        assert_eq!(stats.census, Provenance::Matched);
        assert_eq!(stats.source_note, None);
    }

    #[test]
    fn zero_or_missing_area_leaves_density_unknown() {
        let stats = Fixture::new().stats(RegionLevel::State, "MP");
        assert_eq!(stats.population_total, Some(0));
        assert_eq!(stats.area_sq_km, None);
        assert_eq!(stats.density_per_sq_km, None);

        assert_eq!(density(Some(10), Some(0.0)), None);
        assert_eq!(density(Some(10), Some(-1.0)), None);
    }

    #[test]
    fn falls_back_to_approximate_table() {
        let stats = Fixture::new().stats(RegionLevel::State, "Teleangana");
        assert_eq!(stats.census, Provenance::Approximate);
        assert_eq!(stats.forest, Provenance::Approximate);
        assert_eq!(stats.district_count, Some(33));
        assert_eq!(stats.population_male, None);
        assert!(stats.is_approximate());
        assert_eq!(
            stats.source_note.as_deref(),
            Some("approximate census data used; approximate forest-cover data used")
        );
    }

    #[test]
    fn partial_match_notes_missing_group() {
        let stats = Fixture::new().stats(RegionLevel::State, "Madhya Pradesh");
        assert_eq!(stats.census, Provenance::Matched);
        assert_eq!(stats.forest, Provenance::Missing);
        assert_eq!(stats.source_note.as_deref(), Some(NOTE_NO_FOREST));
    }

    #[test]
    fn no_data_is_explicit() {
        let stats = Fixture::new().stats(RegionLevel::State, "Goa");
        assert!(stats.is_missing());
        assert_eq!(stats.source_note.as_deref(), Some(NOTE_NO_DATA));
        assert_eq!(stats.households, None);
        assert_eq!(stats.population_total, None);
        assert_eq!(stats.forest_cover_sq_km, None);
        assert_eq!(stats.density_per_sq_km, None);
    }

    #[test]
    fn district_statistics_use_name_column() {
        let stats = Fixture::new().stats(RegionLevel::District, "Bargarh");
        assert_eq!(stats.population_total, Some(400));
        assert_eq!(stats.forest, Provenance::Missing);
    }

    #[test]
    fn village_statistics_are_a_no_data_record() {
        let fixture = Fixture::new();
        let claims = ClaimTable::from_rows(&read_csv_rows_bytes(
            b"state,district,village,status\nOdisha,Bargarh,Khatiya,approved\nOdisha,Bargarh,Khatiya,pending\n",
        ).unwrap());
        let village = RegionId::resolve(RegionLevel::Village, "Khatiya", &fixture.aliases);
        let stats = StatisticsAggregator::new(&fixture.aliases, &fixture.census, &fixture.forest, &fixture.approximate)
            .with_claims(&claims)
            .aggregate(&village);

        assert!(stats.is_missing());
        assert_eq!(stats.source_note.as_deref(), Some(NOTE_NO_DATA));
        assert_eq!(stats.households, None);
        assert_eq!(stats.claims, Some(ClaimTally { total: 2, approved: 1, pending: 1, rejected: 0 }));
    }

    #[test]
    fn overflowing_counts_are_dropped_and_noted() {
        let aliases = AliasTable::builtin().unwrap();
        let census = CensusTable::from_rows(&read_csv_rows_bytes(
            b"State,Households,Population_Persons\nOdisha,18446744073709551615,10\nOdisha,1,5\n",
        ).unwrap());
        let odisha = RegionId::resolve(RegionLevel::State, "Odisha", &aliases);
        let stats = StatisticsAggregator::new(&aliases, &census, &ForestTable::default(), &ApproximateTable::default())
            .aggregate(&odisha);

        assert_eq!(stats.census, Provenance::Matched);
        assert_eq!(stats.households, None);
        assert_eq!(stats.population_total, Some(15));
        assert_eq!(stats.source_note.as_deref(), Some("no forest-cover data found; census totals out of range"));
    }

    #[test]
    fn matched_rows_without_figures_fall_back() {
        let aliases = AliasTable::builtin().unwrap();
        let census = CensusTable::from_rows(&read_csv_rows_bytes(
            b"State,Name,Households\nTelangana,Adilabad,\nOdisha,Bargarh,\n",
        ).unwrap());
        let forest = ForestTable::default();
        let approximate = ApproximateTable::builtin(&aliases).unwrap();
        let aggregator = StatisticsAggregator::new(&aliases, &census, &forest, &approximate);

        let telangana = aggregator.aggregate(&RegionId::resolve(RegionLevel::State, "Telangana", &aliases));
        assert_eq!(telangana.census, Provenance::Approximate);
        assert_eq!(telangana.households, Some(8_000_000));

        let odisha = aggregator.aggregate(&RegionId::resolve(RegionLevel::State, "Odisha", &aliases));
        assert!(odisha.is_missing());
        assert_eq!(odisha.district_count, None);
        assert_eq!(odisha.source_note.as_deref(), Some(NOTE_NO_DATA));
    }

    #[test]
    fn serializes_camel_case() {
        let stats = Fixture::new().stats(RegionLevel::State, "Goa");
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["sourceNote"], "no data found");
        assert_eq!(json["census"], "missing");
        assert!(json["populationTotal"].is_null());
        assert_eq!(json["region"]["canonicalName"], "goa");
    }
}
