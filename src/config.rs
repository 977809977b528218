//! Run configuration for the scenario transformer.
//!
//! A `TransformConfig` is built once from the command line, validated, and
//! then passed by reference into every scenario conversion. Nothing in it
//! changes after construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConvertError, Result};

/// Column naming and header convention of the emitted CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `A1..AN` feature columns, `01..0K` ranking columns, type line.
    Kebi,
    /// Like `Kebi` with the original names appended after `_`.
    KebiNames,
    /// Original column names, no type line.
    Plain,
}

impl OutputFormat {
    pub const SUPPORTED: [&'static str; 3] = ["kebi", "kebi_names", "plain"];

    /// Whether the format carries the value-type line after the header.
    pub fn has_type_line(self) -> bool {
        matches!(self, OutputFormat::Kebi | OutputFormat::KebiNames)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Kebi => "kebi",
            OutputFormat::KebiNames => "kebi_names",
            OutputFormat::Plain => "plain",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "kebi" => Ok(OutputFormat::Kebi),
            "kebi_names" => Ok(OutputFormat::KebiNames),
            "plain" => Ok(OutputFormat::Plain),
            other => Err(ConvertError::config(format!(
                "Output format is not supported, output format is: {other}, supported output formats: {}",
                Self::SUPPORTED.join(", ")
            ))),
        }
    }
}

/// How tied performance values are turned into ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMethod {
    Average,
    Min,
    Max,
    Dense,
    Ordinal,
    /// Keep the raw performance values.
    NoRanking,
}

impl RankMethod {
    pub const SUPPORTED: [&'static str; 6] =
        ["average", "min", "max", "dense", "ordinal", "no_ranking"];

    pub fn as_str(self) -> &'static str {
        match self {
            RankMethod::Average => "average",
            RankMethod::Min => "min",
            RankMethod::Max => "max",
            RankMethod::Dense => "dense",
            RankMethod::Ordinal => "ordinal",
            RankMethod::NoRanking => "no_ranking",
        }
    }
}

impl fmt::Display for RankMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankMethod {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "average" => Ok(RankMethod::Average),
            "min" => Ok(RankMethod::Min),
            "max" => Ok(RankMethod::Max),
            "dense" => Ok(RankMethod::Dense),
            "ordinal" => Ok(RankMethod::Ordinal),
            "no_ranking" => Ok(RankMethod::NoRanking),
            other => Err(ConvertError::config(format!(
                "Unsupported rank assignment method for tied ranking: {other}, supported methods: {}",
                Self::SUPPORTED.join(", ")
            ))),
        }
    }
}

/// Parse a field delimiter given on the command line.
///
/// Accepts a single ASCII character, or the two-character escape `\t`.
pub fn parse_separator(s: &str) -> Result<u8> {
    if s == "\\t" {
        return Ok(b'\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        (Some(c), None) => Err(ConvertError::config(format!(
            "The separator must be an ASCII character, specified separator: {c}"
        ))),
        _ => Err(ConvertError::config(format!(
            "The separator value should be one char, specified separator: {s:?}"
        ))),
    }
}

/// Immutable settings shared by every scenario of a run.
#[derive(Debug, Clone)]
pub struct TransformConfig {
    pub scenarios_folder: PathBuf,
    pub output_folder: PathBuf,
    pub output_format: OutputFormat,
    pub rank_method: RankMethod,
    pub separator: u8,
    pub null_replacement: String,
    /// Multiplier on the cutoff for runtime runs that did not finish.
    pub par_factor: f64,
}

impl TransformConfig {
    /// Build a configuration with the command-line defaults.
    pub fn new(scenarios_folder: impl Into<PathBuf>, output_folder: impl Into<PathBuf>) -> Self {
        Self {
            scenarios_folder: scenarios_folder.into(),
            output_folder: output_folder.into(),
            output_format: OutputFormat::Plain,
            rank_method: RankMethod::Average,
            separator: b'\t',
            null_replacement: "NULL".to_string(),
            par_factor: 1.0,
        }
    }

    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn with_rank_method(mut self, rank_method: RankMethod) -> Self {
        self.rank_method = rank_method;
        self
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_null_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.null_replacement = replacement.into();
        self
    }

    pub fn with_par_factor(mut self, par_factor: f64) -> Self {
        self.par_factor = par_factor;
        self
    }

    /// Check the folders and prepare the output directory.
    ///
    /// Fails before any scenario is processed when the scenario folder is
    /// missing or the output folder cannot be created.
    pub fn prepare(&self) -> Result<()> {
        if !self.scenarios_folder.exists() {
            return Err(ConvertError::config(format!(
                "Folder path of ASlib scenarios couldn't be found, ASlib scenario path: {}",
                self.scenarios_folder.display()
            )));
        }
        if !self.par_factor.is_finite() || self.par_factor <= 0.0 {
            return Err(ConvertError::config(format!(
                "PAR factor must be a positive number, got {}",
                self.par_factor
            )));
        }
        create_output_folder(&self.output_folder)
    }

    /// Path of the CSV written for `scenario_name`.
    pub fn output_path(&self, scenario_name: &str) -> PathBuf {
        self.output_folder.join(format!("{scenario_name}.csv"))
    }
}

fn create_output_folder(path: &Path) -> Result<()> {
    if let Err(e) = std::fs::create_dir_all(path) {
        return Err(ConvertError::config(format!(
            "Output folder couldn't be created, CSV output folder path: {} ({e})",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(ConvertError::config(format!(
            "Output folder couldn't be created, CSV output folder path: {}",
            path.display()
        )));
    }
    Ok(())
}
