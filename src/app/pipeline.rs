//! Shared "selection pipeline" used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV load -> category classification -> range/indicator/keyword filter
//!
//! The subcommands then only decide which engine operation to run on the
//! selection and how to present it.

use crate::analytics::{ForecastBatch, classify_category, filter_range, forecast_indicators};
use crate::domain::{RunConfig, Table};
use crate::error::AppError;
use crate::io::ingest::{IngestedTable, load_table};

/// All computed outputs of a selection run.
#[derive(Debug, Clone)]
pub struct Selection {
    pub ingest: IngestedTable,
    /// Category subset over the full year span.
    pub classified: Table,
    /// `classified` after range, indicator and keyword filters.
    pub selected: Table,
}

/// Load the configured CSV and apply the selection.
pub fn run_selection(config: &RunConfig) -> Result<Selection, AppError> {
    let ingest = load_table(&config.csv_path)?;
    select_from(ingest, config)
}

/// Apply the selection to an already loaded table.
pub fn select_from(ingest: IngestedTable, config: &RunConfig) -> Result<Selection, AppError> {
    let classified = match config.resolved_category() {
        Some(category) => classify_category(&ingest.table, &category),
        None => ingest.table.clone(),
    };

    // Unset bounds are open-ended; the filter is inclusive so this equals the data span.
    let selected = filter_range(
        &classified,
        config.year_min.unwrap_or(i32::MIN),
        config.year_max.unwrap_or(i32::MAX),
        config.indicator.as_deref(),
        config.keyword.as_deref(),
    )?;
    log::info!(
        "selection: {} classified, {} after filters",
        classified.len(),
        selected.len()
    );

    Ok(Selection {
        ingest,
        classified,
        selected,
    })
}

/// Forecast every indicator in the selection using its full category history.
///
/// The year filter narrows *which* indicators are forecast, not how much
/// history each fit sees.
pub fn forecast_selection(selection: &Selection) -> ForecastBatch {
    forecast_indicators(&selection.classified, &selection.selected.indicator_names())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{CategoryKind, DedupePolicy};
    use crate::io::ingest::load_table_from_reader;

    const CSV: &str = "Year,Indicator Name,Indicator Code,Value
2000,Agricultural land (% of land area),AG.LND.AGRI.ZS,40
2001,Agricultural land (% of land area),AG.LND.AGRI.ZS,41
2002,Agricultural land (% of land area),AG.LND.AGRI.ZS,42
2002,Rural population,SP.RUR.TOTL,80
2001,Access to electricity,EG.ELC.ACCS.ZS,60
";

    fn config(category: CategoryKind) -> RunConfig {
        RunConfig {
            csv_path: PathBuf::from("unused.csv"),
            category,
            tags: Vec::new(),
            year_min: None,
            year_max: None,
            indicator: None,
            keyword: None,
            dedupe: DedupePolicy::First,
        }
    }

    fn ingest() -> IngestedTable {
        load_table_from_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn category_then_filters() {
        let mut cfg = config(CategoryKind::Rural);
        let sel = select_from(ingest(), &cfg).unwrap();
        assert_eq!(sel.classified.indicator_names(), vec!["Rural population", "Access to electricity"]);

        cfg.year_max = Some(2001);
        let sel = select_from(ingest(), &cfg).unwrap();
        assert_eq!(sel.selected.indicator_names(), vec!["Access to electricity"]);
    }

    #[test]
    fn inverted_bounds_surface_as_usage_error() {
        let mut cfg = config(CategoryKind::All);
        cfg.year_min = Some(2002);
        cfg.year_max = Some(2001);
        assert_eq!(select_from(ingest(), &cfg).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn forecast_uses_history_outside_the_year_filter() {
        let mut cfg = config(CategoryKind::Agriculture);
        cfg.year_min = Some(2002);
        let sel = select_from(ingest(), &cfg).unwrap();
        assert_eq!(sel.selected.len(), 1);

        let batch = forecast_selection(&sel);
        assert_eq!(batch.points.len(), 1);
        assert_eq!(batch.points[0].predicted_year, 2003);
        assert_eq!(batch.points[0].predicted_value, 43.0);
    }
}
