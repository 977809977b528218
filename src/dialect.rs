//! Column naming per output format.

use crate::config::OutputFormat;
use crate::table::Table;

/// Rename feature and ranking columns in place for `format`.
///
/// Row data, index and column count are left untouched. `Plain` keeps the
/// original names.
pub fn rename_columns(format: OutputFormat, features: &mut Table, rankings: &mut Table) {
    match format {
        OutputFormat::Kebi => {
            features.columns = (1..=features.num_columns()).map(feature_label).collect();
            rankings.columns = (1..=rankings.num_columns()).map(ranking_label).collect();
        }
        OutputFormat::KebiNames => {
            features.columns = with_labels(&features.columns, feature_label);
            rankings.columns = with_labels(&rankings.columns, ranking_label);
        }
        OutputFormat::Plain => {}
    }
}

/// `A1`, `A2`, ...
fn feature_label(number: usize) -> String {
    format!("A{number}")
}

/// `01`, `02`, ... `99`, `100`, ...
fn ranking_label(number: usize) -> String {
    format!("{number:02}")
}

fn with_labels(names: &[String], label: fn(usize) -> String) -> Vec<String> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}_{name}", label(i + 1)))
        .collect()
}
