//! ASlib scenario loading.
//!
//! A scenario directory holds at least:
//! - `description.txt`: YAML metadata (performance type, maximize, cutoff)
//! - `feature_values.arff`: one row per instance and repetition
//! - `algorithm_runs.arff`: one row per instance, repetition and algorithm
//!
//! Other files (feature costs, CV splits, run status of feature steps) are
//! not needed for the conversion and are not read.

pub mod arff;
pub mod description;

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub use arff::{Arff, AttributeKind, Value, parse_arff};
pub use description::{Description, PerformanceType};

use crate::error::{ConvertError, Result};
use crate::table::Table;

pub const DESCRIPTION_FILE: &str = "description.txt";
pub const FEATURE_VALUES_FILE: &str = "feature_values.arff";
pub const ALGORITHM_RUNS_FILE: &str = "algorithm_runs.arff";

/// A loaded scenario: features and performances over the same instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub feature_table: Table,
    pub performance_table: Table,
    pub performance_type: PerformanceType,
    /// Higher performance values are better.
    pub maximize: bool,
    pub algorithm_cutoff_time: Option<f64>,
}

impl Scenario {
    pub fn algorithms(&self) -> &[String] {
        &self.performance_table.columns
    }
}

/// Something that turns a scenario directory into a [`Scenario`].
pub trait ScenarioSource {
    fn read(&self, dir: &Path) -> Result<Scenario>;
}

/// Reader for the on-disk ASlib format.
#[derive(Debug, Clone)]
pub struct AslibReader {
    /// Penalty multiplier on the cutoff for unsuccessful runtime runs.
    pub par_factor: f64,
}

impl Default for AslibReader {
    fn default() -> Self {
        Self { par_factor: 1.0 }
    }
}

impl AslibReader {
    pub fn new(par_factor: f64) -> Self {
        Self { par_factor }
    }
}

impl ScenarioSource for AslibReader {
    fn read(&self, dir: &Path) -> Result<Scenario> {
        let description = read_file(dir, DESCRIPTION_FILE)?;
        let description = Description::from_yaml(&description)
            .map_err(|e| ConvertError::scenario(dir.join(DESCRIPTION_FILE), e.to_string()))?;
        let performance_type = description
            .performance_type()
            .map_err(|e| ConvertError::scenario(dir.join(DESCRIPTION_FILE), e))?;

        let features = read_arff(dir, FEATURE_VALUES_FILE)?;
        let feature_table = feature_table(&features)
            .map_err(|e| ConvertError::scenario(dir.join(FEATURE_VALUES_FILE), e))?;

        let runs = read_arff(dir, ALGORITHM_RUNS_FILE)?;
        let settings = RunSettings {
            measure: description.performance_measure(),
            performance_type,
            cutoff: description.cutoff_time(),
            par_factor: self.par_factor,
            declared_algorithms: description.algorithms(),
        };
        let performance_table = performance_table(&runs, &settings, &feature_table.index)
            .map_err(|e| ConvertError::scenario(dir.join(ALGORITHM_RUNS_FILE), e))?;

        let name = description
            .scenario_id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| dir_name(dir));

        debug!(
            scenario = %name,
            instances = feature_table.num_rows(),
            features = feature_table.num_columns(),
            algorithms = performance_table.num_columns(),
            "scenario loaded"
        );

        Ok(Scenario {
            name,
            feature_table,
            performance_table,
            performance_type,
            maximize: description.maximize(),
            algorithm_cutoff_time: description.cutoff_time(),
        })
    }
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

fn read_file(dir: &Path, file: &str) -> Result<String> {
    let path: PathBuf = dir.join(file);
    fs::read_to_string(&path).map_err(|e| ConvertError::scenario(&path, e.to_string()))
}

fn read_arff(dir: &Path, file: &str) -> Result<Arff> {
    let text = read_file(dir, file)?;
    parse_arff(&text).map_err(|e| ConvertError::scenario(dir.join(file), e))
}

/// Running mean that ignores missing values.
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

fn text_cell(row: &[Value], idx: usize, what: &str) -> std::result::Result<String, String> {
    match &row[idx] {
        Value::Text(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Missing => Err(format!("missing {what}")),
    }
}

fn required_attribute(arff: &Arff, name: &str) -> std::result::Result<usize, String> {
    arff.attribute_index(name)
        .ok_or_else(|| format!("no '{name}' attribute"))
}

/// Build the feature table: repetitions averaged, instances sorted by id.
pub fn feature_table(arff: &Arff) -> std::result::Result<Table, String> {
    let id_idx = required_attribute(arff, "instance_id")?;
    let rep_idx = arff.attribute_index("repetition");

    let mut feature_idx = Vec::new();
    let mut columns = Vec::new();
    for (i, attr) in arff.attributes.iter().enumerate() {
        if i == id_idx || Some(i) == rep_idx {
            continue;
        }
        if attr.kind != AttributeKind::Numeric {
            warn!(feature = %attr.name, "skipping non-numeric feature");
            continue;
        }
        feature_idx.push(i);
        columns.push(attr.name.clone());
    }

    let mut by_instance: BTreeMap<String, Vec<Mean>> = BTreeMap::new();
    for row in &arff.rows {
        let id = text_cell(row, id_idx, "instance_id")?;
        let means = by_instance
            .entry(id)
            .or_insert_with(|| vec![Mean::default(); feature_idx.len()]);
        for (mean, &i) in means.iter_mut().zip(&feature_idx) {
            mean.add(row[i].as_number());
        }
    }

    let (index, rows): (Vec<String>, Vec<Vec<Option<f64>>>) = by_instance
        .into_iter()
        .map(|(id, means)| (id, means.into_iter().map(Mean::value).collect::<Vec<_>>()))
        .unzip();
    Ok(Table::new(index, columns, rows))
}

/// How algorithm runs are turned into performance values.
#[derive(Debug, Clone)]
pub struct RunSettings<'a> {
    /// Name of the performance column; the first numeric column after
    /// `algorithm` when `None`.
    pub measure: Option<&'a str>,
    pub performance_type: PerformanceType,
    pub cutoff: Option<f64>,
    pub par_factor: f64,
    /// Column order preference; unseen algorithms are dropped.
    pub declared_algorithms: Vec<String>,
}

/// Build the performance table aligned on `instances`.
///
/// Runtime runs whose status is not `ok` score `cutoff * par_factor` when
/// a cutoff is known. Repetitions are averaged.
pub fn performance_table(
    arff: &Arff,
    settings: &RunSettings<'_>,
    instances: &[String],
) -> std::result::Result<Table, String> {
    let id_idx = required_attribute(arff, "instance_id")?;
    let algo_idx = required_attribute(arff, "algorithm")?;
    let status_idx = arff.attribute_index("runstatus");
    let measure_idx = match settings.measure {
        Some(name) => required_attribute(arff, name)?,
        None => arff
            .attributes
            .iter()
            .enumerate()
            .skip(algo_idx + 1)
            .find(|(i, a)| a.kind == AttributeKind::Numeric && Some(*i) != status_idx)
            .map(|(i, _)| i)
            .ok_or_else(|| "no numeric performance measure".to_string())?,
    };
    let penalty = match (settings.performance_type, settings.cutoff) {
        (PerformanceType::Runtime, Some(cutoff)) => Some(cutoff * settings.par_factor),
        _ => None,
    };

    let mut seen_order: Vec<String> = Vec::new();
    let mut cells: HashMap<(String, String), Mean> = HashMap::new();
    for row in &arff.rows {
        let id = text_cell(row, id_idx, "instance_id")?;
        let algorithm = text_cell(row, algo_idx, "algorithm")?;
        let status = status_idx.and_then(|i| row[i].as_text());

        let value = match (penalty, status) {
            (Some(p), Some(s)) if s != "ok" => Some(p),
            _ => row[measure_idx].as_number(),
        };

        if !seen_order.contains(&algorithm) {
            seen_order.push(algorithm.clone());
        }
        cells.entry((id, algorithm)).or_default().add(value);
    }

    let mut columns: Vec<String> = settings
        .declared_algorithms
        .iter()
        .filter(|a| seen_order.contains(a))
        .cloned()
        .collect();
    for algorithm in &settings.declared_algorithms {
        if !seen_order.contains(algorithm) {
            warn!(algorithm = %algorithm, "declared algorithm has no runs");
        }
    }
    for algorithm in seen_order {
        if !columns.contains(&algorithm) {
            columns.push(algorithm);
        }
    }

    let rows = instances
        .iter()
        .map(|id| {
            columns
                .iter()
                .map(|a| {
                    cells
                        .get(&(id.clone(), a.clone()))
                        .and_then(|m| m.value())
                })
                .collect()
        })
        .collect();

    Ok(Table::new(instances.to_vec(), columns, rows))
}
