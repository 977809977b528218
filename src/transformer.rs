//! Scenario-to-CSV transformer.
//!
//! For each scenario directory found under the configured root:
//! 1. read the scenario
//! 2. rank the algorithms per instance
//! 3. rename the columns for the output format
//! 4. write `<output>/<scenario>.csv`
//!
//! Scenarios are handled one after the other; the first error stops the run.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::TransformConfig;
use crate::dialect::rename_columns;
use crate::discovery::scenario_folder_paths;
use crate::emit::{CsvLayout, write_csv};
use crate::error::Result;
use crate::ranking::performances_to_rankings;
use crate::scenario::{AslibReader, Scenario, ScenarioSource};
use crate::table::Table;

/// Outcome of converting one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub scenario: String,
    pub output_path: PathBuf,
    pub instances: usize,
    pub features: usize,
    pub algorithms: usize,
}

/// Converts scenarios with a fixed configuration.
pub struct Transformer<S = AslibReader> {
    config: TransformConfig,
    source: S,
}

impl Transformer<AslibReader> {
    /// Transformer reading the ASlib on-disk format.
    pub fn new(config: TransformConfig) -> Self {
        let source = AslibReader::new(config.par_factor);
        Self { config, source }
    }
}

impl<S: ScenarioSource> Transformer<S> {
    pub fn with_source(config: TransformConfig, source: S) -> Self {
        Self { config, source }
    }

    /// Validate the configuration, then convert every scenario under the
    /// scenario folder.
    pub fn transform_all(&self) -> Result<Vec<ConversionSummary>> {
        self.config.prepare()?;

        let folders = scenario_folder_paths(&self.config.scenarios_folder)?;
        debug!(count = folders.len(), "discovered scenario folders");

        let mut summaries = Vec::with_capacity(folders.len());
        for folder in folders {
            let summary = self.transform_scenario(&folder)?;
            info!(
                "ASlib scenario {} is transformed to a {} formatted CSV file.",
                summary.scenario, self.config.output_format
            );
            summaries.push(summary);
        }
        Ok(summaries)
    }

    /// Read, convert and write a single scenario directory.
    pub fn transform_scenario(&self, folder: &Path) -> Result<ConversionSummary> {
        debug!(folder = %folder.display(), "reading scenario");
        let scenario = self.source.read(folder)?;
        self.write_scenario(&scenario)
    }

    /// Convert an already loaded scenario and write its CSV file.
    pub fn write_scenario(&self, scenario: &Scenario) -> Result<ConversionSummary> {
        let (features, rankings) = self.convert(scenario);
        let output_path = self.config.output_path(&scenario.name);

        let layout = CsvLayout {
            format: self.config.output_format,
            separator: self.config.separator,
            null_replacement: &self.config.null_replacement,
        };
        write_csv(&output_path, &features, &rankings, layout)?;

        Ok(ConversionSummary {
            scenario: scenario.name.clone(),
            output_path,
            instances: features.num_rows(),
            features: features.num_columns(),
            algorithms: rankings.num_columns(),
        })
    }

    /// Feature and ranking tables with output column names.
    pub fn convert(&self, scenario: &Scenario) -> (Table, Table) {
        let mut features = scenario.feature_table.clone();
        let mut rankings = performances_to_rankings(scenario, self.config.rank_method);
        rename_columns(self.config.output_format, &mut features, &mut rankings);
        (features, rankings)
    }
}
