//! Year-range, indicator and keyword filtering.

use crate::domain::Table;
use crate::error::AnalyticsError;

/// Restrict `table` to `year_min..=year_max`, then optionally to one indicator
/// (exact name) and to names containing `keyword` (trimmed, case-insensitive).
///
/// Records without a year are always dropped. An empty result is not an error.
pub fn filter_range(
    table: &Table,
    year_min: i32,
    year_max: i32,
    indicator_name: Option<&str>,
    keyword: Option<&str>,
) -> Result<Table, AnalyticsError> {
    if year_min > year_max {
        return Err(AnalyticsError::InvalidRange {
            min: year_min,
            max: year_max,
        });
    }
    let keyword = keyword.map(|k| k.trim().to_lowercase());

    let filtered = table
        .iter()
        .filter(|r| matches!(r.year, Some(y) if (year_min..=year_max).contains(&y)))
        .filter(|r| indicator_name.is_none_or(|name| r.indicator_name == name))
        .filter(|r| {
            keyword
                .as_deref()
                .is_none_or(|k| r.indicator_name.to_lowercase().contains(k))
        })
        .cloned()
        .collect();
    Ok(filtered)
}
