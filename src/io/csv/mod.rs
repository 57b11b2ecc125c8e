//! CSV reading operations.

mod read;

pub use read::Row;
pub(crate) use read::*;
