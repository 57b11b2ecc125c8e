use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Built-in alias table shipped with the crate.
const BUILTIN_ALIASES: &str = include_str!("../../assets/aliases.json");

/// Strip all whitespace and case-fold to lower case.
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// How a raw name reached its canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Normalized name is itself a known canonical key.
    Exact,
    /// Normalized name was found in the alias table.
    Alias,
    /// Neither matched; the normalized name is returned as-is.
    Unresolved,
}

/// On-disk layout of an alias table asset.
#[derive(Debug, Deserialize)]
struct AliasFile {
    version: u32,
    canonical: Vec<String>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

/// Known canonical region keys plus a table of misspellings and variants.
/// Keys and targets are stored normalized, so the asset may be written with
/// natural spellings ("Madhya Pradesh").
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    version: u32,
    canonical: AHashSet<String>,
    aliases: AHashMap<String, String>,
}

impl AliasTable {
    pub const SUPPORTED_VERSION: u32 = 1;

    pub fn new<C, A, K, V>(canonical: C, aliases: A) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        A: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self {
            version: Self::SUPPORTED_VERSION,
            canonical: canonical.into_iter().map(|c| normalize_name(c.as_ref())).collect(),
            aliases: AHashMap::new(),
        };
        for (from, to) in aliases {
            let to = normalize_name(to.as_ref());
            // Every alias target is a canonical key in its own right.
            table.canonical.insert(to.clone());
            table.aliases.insert(normalize_name(from.as_ref()), to);
        }
        table
    }

    /// Parse an alias table from JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let file: AliasFile = serde_json::from_slice(bytes)
            .context("[region::normalize] Failed to parse alias table")?;
        ensure!(
            file.version == Self::SUPPORTED_VERSION,
            "[region::normalize] Unsupported alias table version {} (expected {})",
            file.version, Self::SUPPORTED_VERSION
        );
        Ok(Self::new(file.canonical, file.aliases))
    }

    /// The alias table embedded in the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_ALIASES.as_bytes())
    }

    /// Register an additional canonical key (e.g. a region from the registry).
    pub fn insert_canonical(&mut self, name: &str) {
        self.canonical.insert(normalize_name(name));
    }

    #[inline] pub fn version(&self) -> u32 { self.version }

    #[inline] pub fn is_canonical(&self, key: &str) -> bool { self.canonical.contains(key) }

    /// Resolve a raw name: exact canonical match, then alias lookup,
    /// otherwise the normalized name is returned unresolved.
    pub fn resolve(&self, raw: &str) -> (String, Resolution) {
        let normalized = normalize_name(raw);
        if self.canonical.contains(&normalized) {
            return (normalized, Resolution::Exact);
        }
        match self.aliases.get(&normalized) {
            Some(target) => {
                tracing::debug!(raw, alias = %normalized, canonical = %target, "resolved region alias");
                (target.clone(), Resolution::Alias)
            }
            None => (normalized, Resolution::Unresolved),
        }
    }

    /// Canonical key for `raw`, discarding how it was reached.
    pub fn canonicalize(&self, raw: &str) -> String {
        self.resolve(raw).0
    }
}
