//! Multi-indicator alignment onto a shared year axis.
//!
//! Only years where *every* requested indicator has a value survive (inner
//! join). Years missing for any indicator are dropped rather than padded, so
//! downstream stacking and correlation never see holes.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{AlignedSeries, DedupePolicy, Table};

/// Align the requested indicators of `table` by year.
///
/// Rows with an absent year or value are ignored. Duplicate
/// `(year, indicator)` rows are resolved by `dedupe`. Repeated names in
/// `indicator_names` collapse to one column. An empty request, or indicators
/// with disjoint coverage, produce an empty series.
pub fn align<S: AsRef<str>>(table: &Table, indicator_names: &[S], dedupe: DedupePolicy) -> AlignedSeries {
    let mut indicators: Vec<String> = Vec::with_capacity(indicator_names.len());
    for name in indicator_names {
        let name = name.as_ref();
        if !indicators.iter().any(|n| n == name) {
            indicators.push(name.to_string());
        }
    }
    if indicators.is_empty() {
        return AlignedSeries::empty(indicators);
    }

    // Per indicator: year -> value.
    let mut by_indicator: HashMap<&str, BTreeMap<i32, f64>> = indicators
        .iter()
        .map(|n| (n.as_str(), BTreeMap::new()))
        .collect();

    for record in table {
        let Some(series) = by_indicator.get_mut(record.indicator_name.as_str()) else {
            continue;
        };
        let (Some(year), Some(value)) = (record.year, record.value) else {
            continue;
        };
        match dedupe {
            DedupePolicy::First => {
                series.entry(year).or_insert(value);
            }
            DedupePolicy::Last => {
                series.insert(year, value);
            }
        }
    }

    let mut rows = BTreeMap::new();
    for &year in by_indicator[indicators[0].as_str()].keys() {
        let row: Option<BTreeMap<String, f64>> = indicators
            .iter()
            .map(|name| {
                by_indicator[name.as_str()]
                    .get(&year)
                    .map(|v| (name.clone(), *v))
            })
            .collect();
        if let Some(row) = row {
            rows.insert(year, row);
        }
    }

    AlignedSeries { indicators, rows }
}
