//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between engine stages by value
//! - exported to JSON/CSV
//! - printed by the report layer without extra conversion

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One row of the indicator table.
///
/// Any field that was blank (or unparseable) in the source is `None`; the
/// engine decides per operation how absent values are treated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub year: Option<i32>,
    pub indicator_name: String,
    pub indicator_code: Option<String>,
    pub value: Option<f64>,
}

impl Record {
    /// Fully populated record.
    pub fn new(year: i32, indicator_name: &str, indicator_code: &str, value: f64) -> Self {
        Self {
            year: Some(year),
            indicator_name: indicator_name.to_string(),
            indicator_code: Some(indicator_code.to_string()),
            value: Some(value),
        }
    }
}

/// An ordered sequence of records.
///
/// Order is kept for display and for "first seen" semantics, but no engine
/// operation depends on it for correctness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct indicator names in first-seen order.
    pub fn indicator_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.indicator_name.as_str()))
            .map(|r| r.indicator_name.clone())
            .collect()
    }

    /// `(year, value)` pairs for one indicator, in input order.
    ///
    /// Rows with an absent year or value are skipped.
    pub fn series(&self, indicator_name: &str) -> Vec<(i32, f64)> {
        self.records
            .iter()
            .filter(|r| r.indicator_name == indicator_name)
            .filter_map(|r| Some((r.year?, r.value?)))
            .collect()
    }

    /// Smallest and largest present year.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let mut years = self.records.iter().filter_map(|r| r.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// First `n` names of a list; the multi-indicator views start from this
/// selection when the user has not picked any.
pub fn default_selection(names: &[String], n: usize) -> Vec<String> {
    names.iter().take(n).cloned().collect()
}

/// A named group of indicators, matched by code tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub tags: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            name: name.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn agriculture() -> Self {
        Self::new("Agriculture", &["AG", "ER"])
    }

    pub fn rural_development() -> Self {
        Self::new("Rural Development", &["EG", "EN", "RUR"])
    }
}

/// Which category to classify by on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Codes containing `AG` or `ER`.
    Agriculture,
    /// Codes containing `EG`, `EN` or `RUR`.
    Rural,
    /// No classification; every record is kept.
    All,
}

impl CategoryKind {
    pub fn category(self) -> Option<Category> {
        match self {
            CategoryKind::Agriculture => Some(Category::agriculture()),
            CategoryKind::Rural => Some(Category::rural_development()),
            CategoryKind::All => None,
        }
    }
}

/// How duplicate `(year, indicator)` rows are resolved during alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DedupePolicy {
    /// Keep the earliest row in input order.
    #[default]
    First,
    /// Keep the latest row in input order.
    Last,
}

/// Indicator values on a shared year axis.
///
/// Only years where every indicator in `indicators` has a value are present,
/// so every inner map has exactly one entry per indicator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    /// Column order, as requested.
    pub indicators: Vec<String>,
    pub rows: BTreeMap<i32, BTreeMap<String, f64>>,
}

impl AlignedSeries {
    /// No rows, with the given column names.
    pub fn empty(indicators: Vec<String>) -> Self {
        Self {
            indicators,
            rows: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.rows.keys().copied().collect()
    }

    pub fn has_indicator(&self, name: &str) -> bool {
        self.indicators.iter().any(|n| n == name)
    }

    pub fn value(&self, year: i32, name: &str) -> Option<f64> {
        self.rows.get(&year)?.get(name).copied()
    }

    /// Values of one column in ascending year order.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        if !self.has_indicator(name) {
            return None;
        }
        self.rows.values().map(|row| row.get(name).copied()).collect()
    }
}

/// Fitted straight line `value = slope * year + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub n_obs: usize,
}

impl TrendLine {
    pub fn predict(&self, year: i32) -> f64 {
        self.slope * f64::from(year) + self.intercept
    }
}

/// One-year-ahead prediction for a single indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub indicator_code: Option<String>,
    pub indicator_name: String,
    pub predicted_year: i32,
    /// Rounded to 2 decimals, half away from zero.
    pub predicted_value: f64,
}

/// Query settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub csv_path: PathBuf,
    pub category: CategoryKind,
    /// Custom tags; when non-empty they replace `category`.
    pub tags: Vec<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub indicator: Option<String>,
    pub keyword: Option<String>,
    pub dedupe: DedupePolicy,
}

impl RunConfig {
    /// Category to classify by, or `None` to keep the whole table.
    pub fn resolved_category(&self) -> Option<Category> {
        if self.tags.is_empty() {
            return self.category.category();
        }
        Some(Category {
            name: "Custom".to_string(),
            tags: self.tags.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, name: &str, value: f64) -> Record {
        Record::new(year, name, "AG.X", value)
    }

    #[test]
    fn indicator_names_are_distinct_in_first_seen_order() {
        let table: Table = vec![rec(2001, "B", 1.0), rec(2000, "A", 2.0), rec(2002, "B", 3.0)]
            .into_iter()
            .collect();
        assert_eq!(table.indicator_names(), vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn series_skips_absent_values() {
        let mut gap = rec(2001, "A", 0.0);
        gap.value = None;
        let table = Table::new(vec![rec(2000, "A", 1.0), gap, rec(2002, "A", 3.0), rec(2000, "B", 9.0)]);
        assert_eq!(table.series("A"), vec![(2000, 1.0), (2002, 3.0)]);
    }

    #[test]
    fn year_span_ignores_missing_years() {
        let mut undated = rec(1900, "A", 1.0);
        undated.year = None;
        let table = Table::new(vec![rec(2005, "A", 1.0), undated, rec(1999, "A", 1.0)]);
        assert_eq!(table.year_span(), Some((1999, 2005)));
        assert_eq!(Table::default().year_span(), None);
    }

    #[test]
    fn column_follows_year_order() {
        let mut aligned = AlignedSeries::empty(vec!["A".into()]);
        aligned.rows.insert(2002, BTreeMap::from([("A".to_string(), 2.0)]));
        aligned.rows.insert(2001, BTreeMap::from([("A".to_string(), 1.0)]));
        assert_eq!(aligned.years(), vec![2001, 2002]);
        assert_eq!(aligned.column("A"), Some(vec![1.0, 2.0]));
        assert_eq!(aligned.column("B"), None);
    }

    #[test]
    fn custom_tags_override_category() {
        let config = RunConfig {
            csv_path: PathBuf::from("x.csv"),
            category: CategoryKind::Agriculture,
            tags: vec!["SP".into()],
            year_min: None,
            year_max: None,
            indicator: None,
            keyword: None,
            dedupe: DedupePolicy::First,
        };
        assert_eq!(config.resolved_category().map(|c| c.tags), Some(vec!["SP".to_string()]));
    }
}
