use std::{cmp::Ordering, hash::{Hash, Hasher}, sync::Arc};

use serde::Serialize;

use super::{level::RegionLevel, normalize::AliasTable};

/// Stable key for a region across data sources.
/// Keeps the raw spelling for diagnostics; identity is `(level, canonical)` only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionId {
    #[serde(rename = "levelKind")]
    level: RegionLevel,
    raw_name: Arc<str>,     // e.g. "Telengana"
    #[serde(rename = "canonicalName")]
    canonical: Arc<str>,    // e.g. "telangana"
}

impl RegionId {
    /// Resolve `raw_name` through `aliases` into a region identifier.
    pub fn resolve(level: RegionLevel, raw_name: &str, aliases: &AliasTable) -> Self {
        Self {
            level,
            raw_name: Arc::from(raw_name),
            canonical: Arc::from(aliases.canonicalize(raw_name)),
        }
    }

    #[inline] pub fn level(&self) -> RegionLevel { self.level }

    #[inline] pub fn raw_name(&self) -> &str { &self.raw_name }

    #[inline] pub fn canonical(&self) -> &str { &self.canonical }
}

impl PartialEq for RegionId {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.canonical == other.canonical
    }
}

impl Eq for RegionId {}

impl Hash for RegionId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.level.hash(state);
        self.canonical.hash(state);
    }
}

impl PartialOrd for RegionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for RegionId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level.cmp(&other.level)
            .then_with(|| self.canonical.cmp(&other.canonical))
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.level, self.canonical)
    }
}
