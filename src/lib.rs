//! # aslib-to-csv
//!
//! Converts ASlib algorithm-selection scenarios into flat CSV files for
//! label-ranking learners.
//!
//! ## Overview
//!
//! An ASlib scenario pairs per-instance features with per-algorithm
//! performance measurements. For every scenario directory the converter:
//! - **reads** the description, feature values and algorithm runs
//! - **ranks** the algorithms on each instance (rank 1 = best)
//! - **renames** the columns for the chosen output format
//! - **writes** one CSV per scenario, with a value type line for the KEBI
//!   formats
//!
//! ## Example
//!
//! ```
//! use aslib_to_csv::{Direction, RankMethod, rankdata, rank_row};
//!
//! // Runtimes of three algorithms on one instance.
//! let row = vec![Some(1.0), Some(5.0), Some(3.0)];
//! let ranks = rank_row(&row, RankMethod::Ordinal, Direction::Ascending);
//! assert_eq!(ranks, vec![Some(1.0), Some(3.0), Some(2.0)]);
//!
//! assert_eq!(rankdata(&[2.0, 2.0, 1.0], RankMethod::Average), vec![2.5, 2.5, 1.0]);
//! ```

pub mod cli;
pub mod config;
pub mod dialect;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod ranking;
pub mod scenario;
pub mod table;
pub mod transformer;

pub use cli::{Cli, error_report};
pub use config::{OutputFormat, RankMethod, TransformConfig, parse_separator};
pub use dialect::rename_columns;
pub use discovery::scenario_folder_paths;
pub use emit::{CsvLayout, format_general, render_csv, write_csv};
pub use error::{ConvertError, Result};
pub use ranking::{Direction, performances_to_rankings, rank_row, rank_table, rankdata};
pub use scenario::{AslibReader, PerformanceType, Scenario, ScenarioSource};
pub use table::Table;
pub use transformer::{ConversionSummary, Transformer};
