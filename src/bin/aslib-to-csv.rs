//! CLI tool to convert a folder of ASlib scenarios into CSV files.
//!
//! Usage:
//!   aslib-to-csv --aslib_scenarios_folder <dir> --csv_output_folder <dir>
//!   aslib-to-csv --output_format kebi --separator , --rank_assignment_method_for_tied_ranks ordinal
//!
//! One `<scenario>.csv` is written per scenario subfolder.

use aslib_to_csv::{Cli, Transformer, error_report};
use clap::Parser;
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "aslib_to_csv=debug"
    } else {
        "aslib_to_csv=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", error_report(&e));
            process::exit(1);
        }
    };

    debug!(
        scenarios = %config.scenarios_folder.display(),
        output = %config.output_folder.display(),
        format = %config.output_format,
        ranking = %config.rank_method,
        "starting conversion"
    );

    match Transformer::new(config).transform_all() {
        Ok(summaries) => {
            debug!(count = summaries.len(), "all scenarios converted");
        }
        Err(e) => {
            eprintln!("{}", error_report(&e));
            process::exit(1);
        }
    }
}
