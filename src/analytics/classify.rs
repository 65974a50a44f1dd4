//! Category classification by indicator-code tags.

use crate::domain::{Category, Record, Table};

/// Keep the records whose code contains any of `tags`, ignoring case.
///
/// Records without a code never match. Blank tags are ignored, so an empty
/// or all-blank tag list yields an empty table. Input order is preserved.
pub fn classify<S: AsRef<str>>(table: &Table, tags: &[S]) -> Table {
    let needles: Vec<String> = tags
        .iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if needles.is_empty() {
        return Table::default();
    }

    table
        .iter()
        .filter(|r| code_matches(r, &needles))
        .cloned()
        .collect()
}

/// [`classify`] using a category's tags.
pub fn classify_category(table: &Table, category: &Category) -> Table {
    classify(table, &category.tags)
}

fn code_matches(record: &Record, needles: &[String]) -> bool {
    let Some(code) = record.indicator_code.as_deref() else {
        return false;
    };
    let code = code.to_lowercase();
    needles.iter().any(|n| code.contains(n.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut uncoded = Record::new(2000, "Unknown", "", 1.0);
        uncoded.indicator_code = None;
        Table::new(vec![
            Record::new(2000, "Agricultural land (% of land area)", "AG.LND.AGRI.ZS", 43.1),
            Record::new(2000, "Rural population", "SP.RUR.TOTL", 15.2),
            uncoded,
            Record::new(2000, "Access to electricity", "eg.elc.accs.zs", 69.0),
            Record::new(2000, "Forest area", "ag.lnd.frst.zs", 29.9),
        ])
    }

    #[test]
    fn matches_any_tag_case_insensitive() {
        let rural = classify_category(&table(), &Category::rural_development());
        let names: Vec<_> = rural.iter().map(|r| r.indicator_name.as_str()).collect();
        assert_eq!(names, vec!["Rural population", "Access to electricity"]);
    }

    #[test]
    fn preserves_input_order() {
        let agri = classify(&table(), &["ag"]);
        let codes: Vec<_> = agri.iter().filter_map(|r| r.indicator_code.as_deref()).collect();
        assert_eq!(codes, vec!["AG.LND.AGRI.ZS", "ag.lnd.frst.zs"]);
    }

    #[test]
    fn empty_or_blank_tags_match_nothing() {
        let none: [&str; 0] = [];
        assert!(classify(&table(), &none).is_empty());
        assert!(classify(&table(), &["  "]).is_empty());
    }

    #[test]
    fn missing_code_never_matches() {
        let hits = classify(&table(), &["Unknown", "N"]);
        assert!(hits.iter().all(|r| r.indicator_code.is_some()));
    }
}
