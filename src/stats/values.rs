//! Lenient numeric cell parsing for statistics tables.

use crate::io::csv::Row;

/// First non-empty cell among `columns`, trimmed.
pub(crate) fn cell<'a>(row: &'a Row, columns: &[&str]) -> Option<&'a str> {
    columns.iter()
        .filter_map(|column| row.get(*column))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// Parse a measure such as "112,077.5" or "+20". Thousands separators are ignored.
pub(crate) fn parse_measure(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a non-negative count; fractional text is truncated.
pub(crate) fn parse_count(text: &str) -> Option<u64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<u64>().ok().or_else(|| {
        parse_measure(&cleaned)
            .filter(|v| *v >= 0.0)
            .map(|v| v.trunc() as u64)
    })
}

/// A count total that does not fit in `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("count total exceeds the u64 range")]
pub(crate) struct CountOverflow;

/// Sum of the present counts; `Ok(None)` when no count is present.
pub(crate) fn sum_counts(values: impl IntoIterator<Item = Option<u64>>) -> Result<Option<u64>, CountOverflow> {
    values.into_iter().flatten().try_fold(None, |total: Option<u64>, value| {
        total.unwrap_or(0).checked_add(value).map(Some).ok_or(CountOverflow)
    })
}

/// Sum of the present values; `None` when no value is present.
pub(crate) fn sum_present<T: std::iter::Sum<T>>(values: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    let mut present = values.into_iter().flatten().peekable();
    present.peek()?;
    Some(present.sum())
}
