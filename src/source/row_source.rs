use std::{path::PathBuf, sync::Arc};

use ahash::AHashMap;
use anyhow::Result;

use crate::io::csv::{read_csv_rows, read_csv_rows_bytes, Row};

/// Read-only access to row tables by source id, e.g.
/// "Odisha.csv", "Census_AllStates.csv".
pub trait RowSource: Send + Sync {
    /// Rows of `source_id`, or `None` when no such source exists.
    fn read_rows(&self, source_id: &str) -> Result<Option<Vec<Row>>>;

    /// Whether `source_id` currently exists.
    fn has(&self, source_id: &str) -> bool;
}

/// CSV files under a root directory.
#[derive(Debug, Clone)]
pub struct DiskSource {
    root: PathBuf,
}

impl DiskSource {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    fn full(&self, source_id: &str) -> PathBuf { self.root.join(source_id) }
}

impl RowSource for DiskSource {
    fn read_rows(&self, source_id: &str) -> Result<Option<Vec<Row>>> {
        let path = self.full(source_id);
        if !path.is_file() {
            return Ok(None);
        }
        read_csv_rows(&path).map(Some)
    }

    fn has(&self, source_id: &str) -> bool { self.full(source_id).is_file() }
}

/// In-memory CSV tables.
#[derive(Debug, Default, Clone)]
pub struct MemSource {
    files: AHashMap<String, Arc<[u8]>>,
}

impl MemSource {
    pub fn new() -> Self { Self::default() }

    /// Add or replace the CSV text for `source_id`.
    pub fn with(mut self, source_id: &str, csv: impl AsRef<[u8]>) -> Self {
        self.insert(source_id, csv);
        self
    }

    pub fn insert(&mut self, source_id: &str, csv: impl AsRef<[u8]>) {
        self.files.insert(source_id.to_string(), Arc::from(csv.as_ref()));
    }
}

impl RowSource for MemSource {
    fn read_rows(&self, source_id: &str) -> Result<Option<Vec<Row>>> {
        self.files.get(source_id)
            .map(|bytes| read_csv_rows_bytes(bytes))
            .transpose()
    }

    fn has(&self, source_id: &str) -> bool { self.files.contains_key(source_id) }
}
