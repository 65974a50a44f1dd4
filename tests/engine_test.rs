//! End-to-end engine tests: CSV text -> classify -> filter -> align/correlate/forecast.

use indicator_trends::analytics::{
    align, classify_category, correlate, filter_range, forecast_all, forecast_next,
};
use indicator_trends::domain::{Category, DedupePolicy, Record, Table, default_selection};
use indicator_trends::error::AnalyticsError;
use indicator_trends::io::load_table_from_reader;

const DATASET: &str = "Year,Indicator Name,Indicator Code,Value
2010,Agricultural land (% of land area),AG.LND.AGRI.ZS,10.0
2011,Agricultural land (% of land area),AG.LND.AGRI.ZS,12.0
2012,Agricultural land (% of land area),AG.LND.AGRI.ZS,14.0
2011,Cereal yield (kg per hectare),AG.YLD.CREL.KG,3000
2012,Cereal yield (kg per hectare),AG.YLD.CREL.KG,3100
2013,Cereal yield (kg per hectare),AG.YLD.CREL.KG,3150
2012,Renewable freshwater per capita,ER.H2O.INTR.PC,2400
2010,Rural population (% of total population),SP.RUR.TOTL.ZS,81.6
2011,Rural population (% of total population),SP.RUR.TOTL.ZS,81.6
2012,Rural population (% of total population),SP.RUR.TOTL.ZS,81.5
2012,Rural population (% of total population),SP.RUR.TOTL.ZS,99.9
2013,Access to electricity (% of population),EG.ELC.ACCS.ZS,
";

fn load() -> Table {
    load_table_from_reader(DATASET.as_bytes()).unwrap().table
}

fn rec(year: i32, name: &str, value: f64) -> Record {
    Record::new(year, name, "AG.TEST", value)
}

#[test]
fn agriculture_category_matches_ag_and_er_codes() {
    let agri = classify_category(&load(), &Category::agriculture());
    assert_eq!(
        agri.indicator_names(),
        vec![
            "Agricultural land (% of land area)",
            "Cereal yield (kg per hectare)",
            "Renewable freshwater per capita",
        ]
    );
}

#[test]
fn rural_category_matches_eg_en_rur_codes() {
    let rural = classify_category(&load(), &Category::rural_development());
    assert_eq!(
        rural.indicator_names(),
        vec![
            "Rural population (% of total population)",
            "Access to electricity (% of population)",
        ]
    );
}

#[test]
fn inner_join_keeps_only_shared_years() {
    let table = Table::new(vec![
        rec(2000, "A", 1.0),
        rec(2001, "A", 2.0),
        rec(2002, "A", 3.0),
        rec(2001, "B", 1.5),
        rec(2002, "B", 2.5),
        rec(2003, "B", 3.5),
    ]);
    let aligned = align(&table, &["A", "B"], DedupePolicy::First);
    assert_eq!(aligned.years(), vec![2001, 2002]);
}

#[test]
fn align_of_nothing_is_empty() {
    let none: [&str; 0] = [];
    let aligned = align(&load(), &none, DedupePolicy::First);
    assert!(aligned.is_empty());
    assert!(aligned.indicators.is_empty());
}

#[test]
fn dedupe_policy_changes_the_joined_value() {
    let table = load();
    let name = "Rural population (% of total population)";
    let first = align(&table, &[name], DedupePolicy::First);
    let last = align(&table, &[name], DedupePolicy::Last);
    assert_eq!(first.value(2012, name), Some(81.5));
    assert_eq!(last.value(2012, name), Some(99.9));
}

#[test]
fn correlation_over_filtered_agriculture() {
    let agri = classify_category(&load(), &Category::agriculture());
    let window = filter_range(&agri, 2010, 2013, None, Some("  (")).unwrap();
    let names = default_selection(&window.indicator_names(), 2);
    let aligned = align(&window, &names, DedupePolicy::First);

    assert_eq!(aligned.years(), vec![2011, 2012]);
    let r = correlate(&aligned, &names).unwrap();
    assert!((r - 1.0).abs() < 1e-12);
}

#[test]
fn correlation_on_one_year_is_insufficient() {
    let table = Table::new(vec![rec(2000, "A", 1.0), rec(2000, "B", 2.0)]);
    let aligned = align(&table, &["A", "B"], DedupePolicy::First);
    assert!(matches!(
        correlate(&aligned, &["A", "B"]),
        Err(AnalyticsError::InsufficientData(_))
    ));
}

#[test]
fn forecast_on_a_known_line() {
    let point = forecast_next(&load(), "Agricultural land (% of land area)").unwrap();
    assert_eq!(point.predicted_year, 2013);
    assert_eq!(point.predicted_value, 16.0);
    assert_eq!(point.indicator_code.as_deref(), Some("AG.LND.AGRI.ZS"));
}

#[test]
fn forecast_failures() {
    let single = Table::new(vec![rec(2010, "A", 1.0)]);
    assert!(matches!(forecast_next(&single, "A"), Err(AnalyticsError::InsufficientData(_))));

    let same_year = Table::new(vec![rec(2010, "A", 1.0), rec(2010, "A", 2.0)]);
    assert!(matches!(forecast_next(&same_year, "A"), Err(AnalyticsError::DegenerateInput(_))));
}

#[test]
fn batch_forecast_isolates_failures() {
    let mut records = vec![rec(2010, "Sparse", 5.0)];
    records.extend((0..5).map(|i| rec(2010 + i, "Dense", 1.0 + i as f64 * 0.5)));
    let batch = forecast_all(&Table::new(records));

    assert_eq!(batch.points.len(), 1);
    assert_eq!(batch.points[0].indicator_name, "Dense");
    assert_eq!(batch.points[0].predicted_year, 2015);
    assert_eq!(batch.points[0].predicted_value, 3.5);
    assert_eq!(batch.skipped.len(), 1);
    assert!(matches!(batch.skipped[0].1, AnalyticsError::InsufficientData(_)));
}

#[test]
fn batch_forecast_over_loaded_dataset() {
    let batch = forecast_all(&load());
    let forecast: Vec<_> = batch.points.iter().map(|p| p.indicator_name.as_str()).collect();
    let skipped: Vec<_> = batch.skipped.iter().map(|(n, e)| (n.as_str(), e.kind())).collect();

    assert_eq!(
        forecast,
        vec![
            "Agricultural land (% of land area)",
            "Cereal yield (kg per hectare)",
            "Rural population (% of total population)",
        ]
    );
    assert_eq!(
        skipped,
        vec![
            ("Renewable freshwater per capita", "InsufficientData"),
            ("Access to electricity (% of population)", "InsufficientData"),
        ]
    );
}
