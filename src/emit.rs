//! CSV rendering of a converted scenario.
//!
//! Layout for the KEBI formats:
//! ```text
//! A1,A2,01,02,03
//! DOUBLE,DOUBLE,NUMERIC,NUMERIC,NUMERIC
//!
//! 0.5,12,1,3,2
//! ```
//! The `plain` format has only the name header before the data rows.
//! Instance ids are never written.

use std::fs;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::config::OutputFormat;
use crate::error::{ConvertError, Result};
use crate::table::Table;

pub const DOUBLE_TYPE: &str = "DOUBLE";
pub const NUMERIC_TYPE: &str = "NUMERIC";

/// Settings for rendering one CSV file.
#[derive(Debug, Clone, Copy)]
pub struct CsvLayout<'a> {
    pub format: OutputFormat,
    pub separator: u8,
    pub null_replacement: &'a str,
}

/// Render features and rankings side by side as CSV text.
///
/// `features` and `rankings` must share an index; the feature table's
/// index decides the row order.
pub fn render_csv(features: &Table, rankings: &Table, layout: CsvLayout<'_>) -> Result<Vec<u8>> {
    let combined = features.concat_columns(rankings);

    let mut writer = WriterBuilder::new()
        .delimiter(layout.separator)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(&combined.columns)?;
    for row in &combined.rows {
        writer.write_record(row.iter().map(|v| format_value(*v, layout.null_replacement)))?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| ConvertError::Csv(e.into_error().into()))?;

    if !layout.format.has_type_line() {
        return Ok(body);
    }

    // Splice the type line and a blank line in after the header.
    let header_end = body
        .iter()
        .position(|&b| b == b'\n')
        .map_or(body.len(), |p| p + 1);
    let type_line = type_line(features.num_columns(), rankings.num_columns(), layout.separator);

    let mut out = Vec::with_capacity(body.len() + type_line.len() + 2);
    out.extend_from_slice(&body[..header_end]);
    out.extend_from_slice(type_line.as_bytes());
    out.extend_from_slice(b"\n\n");
    out.extend_from_slice(&body[header_end..]);
    Ok(out)
}

/// Render and write the CSV file, replacing any existing file.
pub fn write_csv(
    path: &Path,
    features: &Table,
    rankings: &Table,
    layout: CsvLayout<'_>,
) -> Result<()> {
    let content = render_csv(features, rankings, layout)?;
    fs::write(path, content).map_err(|e| ConvertError::io(path, e))
}

/// `DOUBLE` per feature column followed by `NUMERIC` per ranking column.
pub fn type_line(num_features: usize, num_rankings: usize, separator: u8) -> String {
    let sep = char::from(separator).to_string();
    std::iter::repeat_n(DOUBLE_TYPE, num_features)
        .chain(std::iter::repeat_n(NUMERIC_TYPE, num_rankings))
        .collect::<Vec<_>>()
        .join(&sep)
}

fn format_value(value: Option<f64>, null_replacement: &str) -> String {
    match value {
        Some(v) if !v.is_nan() => format_general(v),
        _ => null_replacement.to_string(),
    }
}

/// Format like C's `%g`: six significant digits, no trailing zeros,
/// exponent notation only below 1e-4 or from 1e6 on.
pub fn format_general(value: f64) -> String {
    const PRECISION: i32 = 6;

    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= PRECISION {
        let mantissa = strip_zeros(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else {
        let decimals = (PRECISION - 1 - exponent).max(0) as usize;
        strip_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> (Table, Table) {
        let features = Table::new(
            names(&["i1", "i2"]),
            names(&["A1", "A2"]),
            vec![vec![Some(0.5), None], vec![Some(1e7), Some(3.0)]],
        );
        let rankings = Table::from_values(
            names(&["i1", "i2"]),
            names(&["01", "02"]),
            vec![vec![1.5, 1.5], vec![2.0, 1.0]],
        );
        (features, rankings)
    }

    fn render(format: OutputFormat, separator: u8) -> String {
        let (x, y) = sample();
        let layout = CsvLayout {
            format,
            separator,
            null_replacement: "NULL",
        };
        String::from_utf8(render_csv(&x, &y, layout).unwrap()).unwrap()
    }

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(1.0), "1");
        assert_eq!(format_general(2.5), "2.5");
        assert_eq!(format_general(0.1), "0.1");
        assert_eq!(format_general(123456.0), "123456");
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(0.00001234), "1.234e-05");
        assert_eq!(format_general(-3.25), "-3.25");
        assert_eq!(format_general(1.0 / 3.0), "0.333333");
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(1e100), "1e+100");
    }

    #[test]
    fn test_kebi_layout() {
        let out = render(OutputFormat::Kebi, b',');
        assert_eq!(
            out,
            "A1,A2,01,02\nDOUBLE,DOUBLE,NUMERIC,NUMERIC\n\n0.5,NULL,1.5,1.5\n1e+07,3,2,1\n"
        );
    }

    #[test]
    fn test_plain_layout_has_no_type_line() {
        let out = render(OutputFormat::Plain, b'\t');
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "A1\tA2\t01\t02");
        assert_eq!(lines[1], "0.5\tNULL\t1.5\t1.5");
        assert!(!out.contains(NUMERIC_TYPE));
    }

    #[test]
    fn test_custom_null_replacement() {
        let (x, y) = sample();
        let layout = CsvLayout {
            format: OutputFormat::Plain,
            separator: b';',
            null_replacement: "?",
        };
        let out = String::from_utf8(render_csv(&x, &y, layout).unwrap()).unwrap();
        assert!(out.contains("0.5;?;1.5;1.5"));
    }

    #[test]
    fn test_header_quotes_separator() {
        let x = Table::from_values(names(&["i1"]), names(&["a,b"]), vec![vec![1.0]]);
        let y = Table::from_values(names(&["i1"]), names(&["alg"]), vec![vec![1.0]]);
        let layout = CsvLayout {
            format: OutputFormat::Plain,
            separator: b',',
            null_replacement: "NULL",
        };
        let out = String::from_utf8(render_csv(&x, &y, layout).unwrap()).unwrap();
        assert_eq!(out, "\"a,b\",alg\n1,1\n");
    }

    #[test]
    fn test_empty_scenario_keeps_headers() {
        let x = Table::new(vec![], names(&["A1"]), vec![]);
        let y = Table::new(vec![], names(&["01", "02"]), vec![]);
        let layout = CsvLayout {
            format: OutputFormat::KebiNames,
            separator: b',',
            null_replacement: "NULL",
        };
        let out = String::from_utf8(render_csv(&x, &y, layout).unwrap()).unwrap();
        assert_eq!(out, "A1,01,02\nDOUBLE,NUMERIC,NUMERIC\n\n");
    }

    #[test]
    fn test_write_csv_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scenario.csv");
        fs::write(&path, "stale").unwrap();
        let (x, y) = sample();
        let layout = CsvLayout {
            format: OutputFormat::Kebi,
            separator: b',',
            null_replacement: "NULL",
        };
        write_csv(&path, &x, &y, layout).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("A1,A2,01,02\nDOUBLE"));
    }

    #[test]
    fn test_write_csv_missing_dir_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing").join("scenario.csv");
        let (x, y) = sample();
        let layout = CsvLayout {
            format: OutputFormat::Plain,
            separator: b',',
            null_replacement: "NULL",
        };
        let err = write_csv(&path, &x, &y, layout).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }
}
