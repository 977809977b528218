//! `description.txt` of an ASlib scenario.
//!
//! The file is YAML. Only the keys the converter needs are read; the rest
//! (feature steps, memory limits, ...) are ignored.

use serde::Deserialize;

/// What the performance values measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceType {
    Runtime,
    SolutionQuality,
}

impl PerformanceType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "runtime" => Some(PerformanceType::Runtime),
            "solution_quality" => Some(PerformanceType::SolutionQuality),
            _ => None,
        }
    }
}

/// A YAML value written either as a scalar or as a list.
///
/// ASlib 1.x uses `maximize: false`; later releases use `maximize: [false]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(v) => Some(v),
            OneOrMany::Many(v) => v.first(),
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        match self {
            OneOrMany::One(v) => vec![v.clone()],
            OneOrMany::Many(v) => v.clone(),
        }
    }
}

/// A number, or `?` for "not given".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MaybeNumber {
    Number(f64),
    Text(String),
}

impl MaybeNumber {
    pub fn value(&self) -> Option<f64> {
        match self {
            MaybeNumber::Number(n) => Some(*n),
            MaybeNumber::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Keys of `description.txt` used by the converter.
///
/// Keys written without a value (`algorithms_stochastic:`) read as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub scenario_id: Option<String>,
    #[serde(default)]
    pub performance_measures: Option<OneOrMany<String>>,
    #[serde(default)]
    pub maximize: Option<OneOrMany<bool>>,
    #[serde(default)]
    pub performance_type: Option<OneOrMany<String>>,
    #[serde(default)]
    pub algorithm_cutoff_time: Option<MaybeNumber>,
    #[serde(default)]
    pub algorithms_deterministic: Option<OneOrMany<String>>,
    #[serde(default)]
    pub algorithms_stochastic: Option<OneOrMany<String>>,
    /// ASlib 4 lists algorithms here instead of the two keys above.
    #[serde(default)]
    pub metainfo_algorithms: Option<serde_yaml::Mapping>,
}

impl Description {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(&quote_unknown_markers(yaml))
    }

    /// First performance type entry; defaults to runtime when absent.
    pub fn performance_type(&self) -> Result<PerformanceType, String> {
        match self.performance_type.as_ref().and_then(OneOrMany::first) {
            None => Ok(PerformanceType::Runtime),
            Some(s) => PerformanceType::parse(s)
                .ok_or_else(|| format!("unknown performance_type '{s}'")),
        }
    }

    /// First `maximize` entry; defaults to `false`.
    pub fn maximize(&self) -> bool {
        self.maximize
            .as_ref()
            .and_then(OneOrMany::first)
            .copied()
            .unwrap_or(false)
    }

    pub fn performance_measure(&self) -> Option<&str> {
        self.performance_measures
            .as_ref()
            .and_then(OneOrMany::first)
            .map(String::as_str)
    }

    pub fn cutoff_time(&self) -> Option<f64> {
        self.algorithm_cutoff_time.as_ref().and_then(MaybeNumber::value)
    }

    /// Algorithm names in declaration order.
    pub fn algorithms(&self) -> Vec<String> {
        let mut algorithms: Vec<String> =
            [&self.algorithms_deterministic, &self.algorithms_stochastic]
                .into_iter()
                .flatten()
                .flat_map(OneOrMany::to_vec)
                .collect();
        if let Some(meta) = &self.metainfo_algorithms {
            for key in meta.keys() {
                if let Some(name) = yaml_key_name(key)
                    && !algorithms.contains(&name)
                {
                    algorithms.push(name);
                }
            }
        }
        algorithms
    }
}

/// Quote bare `?` values (`key: ?`, `- ?`), which YAML would otherwise
/// read as a complex-key indicator.
fn quote_unknown_markers(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len());
    for line in yaml.lines() {
        let trimmed = line.trim_end();
        match trimmed.strip_suffix('?') {
            Some(head) if head.ends_with(": ") || head.trim_start() == "- " => {
                out.push_str(head);
                out.push_str("'?'");
            }
            _ => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

fn yaml_key_name(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
