//! Command-line options of `aslib-to-csv`.
//!
//! Values are kept as strings by clap and validated here, so unsupported
//! formats or methods surface as configuration errors before any scenario
//! is read.

use clap::Parser;

use crate::config::{OutputFormat, RankMethod, TransformConfig, parse_separator};
use crate::error::{ConvertError, Result};

/// Transform ASlib scenarios into CSV files, optionally in the KEBI
/// label-ranking format.
#[derive(Parser, Debug, Clone)]
#[command(name = "aslib-to-csv")]
pub struct Cli {
    /// Folder containing the ASlib scenarios, one subfolder per scenario
    #[arg(long = "aslib_scenarios_folder", default_value = "aslib_scenarios")]
    pub aslib_scenarios_folder: String,

    /// Output folder for the created CSV files (created if absent)
    #[arg(long = "csv_output_folder", default_value = "csv_output")]
    pub csv_output_folder: String,

    /// Method used to turn performance values into rankings:
    /// average, min, max, dense, ordinal, no_ranking
    #[arg(
        long = "rank_assignment_method_for_tied_ranks",
        default_value = "average"
    )]
    pub rank_assignment_method_for_tied_ranks: String,

    /// Written in place of missing values
    #[arg(long = "replacement_string_null_feature_values", default_value = "NULL")]
    pub replacement_string_null_feature_values: String,

    /// kebi: KEBI CSV layout; kebi_names: kebi with feature and algorithm
    /// names in the header; plain: original names, no value type line
    #[arg(long = "output_format", default_value = "plain")]
    pub output_format: String,

    /// Field separator, a single character (`\t` for tab)
    #[arg(long = "separator", default_value = "\t")]
    pub separator: String,

    /// Multiplier on the cutoff for unsuccessful runtime runs
    #[arg(long = "par_factor", default_value_t = 1.0)]
    pub par_factor: f64,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Validate the options into a run configuration.
    pub fn to_config(&self) -> Result<TransformConfig> {
        let output_format: OutputFormat = self.output_format.parse()?;
        let rank_method: RankMethod = self.rank_assignment_method_for_tied_ranks.parse()?;
        let separator = parse_separator(&self.separator)?;

        Ok(
            TransformConfig::new(&self.aslib_scenarios_folder, &self.csv_output_folder)
                .with_output_format(output_format)
                .with_rank_method(rank_method)
                .with_separator(separator)
                .with_null_replacement(self.replacement_string_null_feature_values.clone())
                .with_par_factor(self.par_factor),
        )
    }
}

/// Line printed on stderr when the run aborts.
///
/// Written with `eprintln!`, not through the log subscriber, so a
/// `RUST_LOG` filter cannot hide it.
pub fn error_report(err: &ConvertError) -> String {
    format!("Error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformer::Transformer;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("aslib-to-csv").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        let config = cli.to_config().unwrap();
        assert_eq!(config.scenarios_folder.to_str(), Some("aslib_scenarios"));
        assert_eq!(config.output_folder.to_str(), Some("csv_output"));
        assert_eq!(config.output_format, OutputFormat::Plain);
        assert_eq!(config.rank_method, RankMethod::Average);
        assert_eq!(config.separator, b'\t');
        assert_eq!(config.null_replacement, "NULL");
        assert_eq!(config.par_factor, 1.0);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_all_options() {
        let cli = parse(&[
            "--aslib_scenarios_folder",
            "data",
            "--csv_output_folder",
            "out",
            "--rank_assignment_method_for_tied_ranks",
            "dense",
            "--replacement_string_null_feature_values",
            "?",
            "--output_format",
            "kebi_names",
            "--separator",
            ",",
            "--par_factor",
            "10",
            "-v",
        ]);
        let config = cli.to_config().unwrap();
        assert_eq!(config.rank_method, RankMethod::Dense);
        assert_eq!(config.output_format, OutputFormat::KebiNames);
        assert_eq!(config.separator, b',');
        assert_eq!(config.null_replacement, "?");
        assert_eq!(config.par_factor, 10.0);
        assert!(cli.verbose);
    }

    #[test]
    fn test_unsupported_output_format_writes_nothing() {
        let out = tempfile::tempdir().unwrap();
        let target = out.path().join("csv");
        let cli = parse(&[
            "--output_format",
            "xlsx",
            "--csv_output_folder",
            target.to_str().unwrap(),
        ]);
        let err = cli.to_config().unwrap_err();
        assert!(matches!(err, ConvertError::Configuration(_)));
        assert!(!target.exists());
    }

    #[test]
    fn test_error_report_names_cause() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let cli = parse(&[
            "--aslib_scenarios_folder",
            missing.to_str().unwrap(),
            "--csv_output_folder",
            tmp.path().join("out").to_str().unwrap(),
        ]);
        let err = Transformer::new(cli.to_config().unwrap())
            .transform_all()
            .unwrap_err();
        let report = error_report(&err);
        assert!(report.starts_with("Error: configuration error:"), "{report}");
        assert!(report.contains("couldn't be found"));
        assert!(report.contains("nope"));
    }

    #[test]
    fn test_unsupported_rank_method() {
        let cli = parse(&["--rank_assignment_method_for_tied_ranks", "random"]);
        assert!(matches!(
            cli.to_config(),
            Err(ConvertError::Configuration(_))
        ));
    }

    #[test]
    fn test_multi_char_separator() {
        let cli = parse(&["--separator", "::"]);
        assert!(cli.to_config().is_err());
    }

    #[test]
    fn test_run_from_options() {
        let out = tempfile::tempdir().unwrap();
        let scenarios = concat!(env!("CARGO_MANIFEST_DIR"), "/specs/scenarios");
        let cli = parse(&[
            "--aslib_scenarios_folder",
            scenarios,
            "--csv_output_folder",
            out.path().to_str().unwrap(),
            "--output_format",
            "kebi",
        ]);
        let summaries = Transformer::new(cli.to_config().unwrap())
            .transform_all()
            .unwrap();
        assert_eq!(summaries.len(), 2);
        assert!(out.path().join("toy-runtime.csv").is_file());
        assert!(out.path().join("toy-quality.csv").is_file());
    }
}
