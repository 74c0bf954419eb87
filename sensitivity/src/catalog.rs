//! Photometry-table input and sensitivity-table output.
//!
//! The input is a whitespace-delimited text table (`.coldat`) with `#`
//! comment lines and nine fixed-order columns:
//! name, ra, dec, channel, x, y, factor, phot, sigma.
//!
//! The output is tab-delimited: one header comment line naming the four
//! channel columns, then one row per source with each limit printed to six
//! decimal places and unresolved entries rendered as `nan`.

use crate::pipeline::SourceSensitivity;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors from table reading and writing.
#[derive(Error, Debug)]
pub enum TableError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected 9 columns, found {found}")]
    ColumnCount { line: usize, found: usize },
    #[error("line {line}: bad {column} value '{value}'")]
    BadField {
        line: usize,
        column: &'static str,
        value: String,
    },
}

/// One aperture-photometry measurement, immutable once read.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotometryRow {
    pub name: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub channel: u8,
    pub x: f64,
    pub y: f64,
    pub scale_factor: f64,
    pub phot_ujy: f64,
    pub sigma_ujy: f64,
}

/// Read a photometry table from disk.
pub fn read_photometry_table(path: &Path) -> Result<Vec<PhotometryRow>, TableError> {
    parse_photometry_table(&fs::read_to_string(path)?)
}

/// Parse photometry-table text.
///
/// Blank lines and lines starting with `#` are skipped. Parse failures name
/// the 1-based line number and the offending column.
pub fn parse_photometry_table(text: &str) -> Result<Vec<PhotometryRow>, TableError> {
    let mut rows = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 9 {
            return Err(TableError::ColumnCount {
                line,
                found: fields.len(),
            });
        }

        rows.push(PhotometryRow {
            name: fields[0].to_string(),
            ra_deg: parse_f64(fields[1], "ra", line)?,
            dec_deg: parse_f64(fields[2], "dec", line)?,
            channel: fields[3].parse().map_err(|_| TableError::BadField {
                line,
                column: "channel",
                value: fields[3].to_string(),
            })?,
            x: parse_f64(fields[4], "x", line)?,
            y: parse_f64(fields[5], "y", line)?,
            scale_factor: parse_f64(fields[6], "factor", line)?,
            phot_ujy: parse_f64(fields[7], "phot", line)?,
            sigma_ujy: parse_f64(fields[8], "sigma", line)?,
        });
    }

    Ok(rows)
}

fn parse_f64(value: &str, column: &'static str, line: usize) -> Result<f64, TableError> {
    value.parse().map_err(|_| TableError::BadField {
        line,
        column,
        value: value.to_string(),
    })
}

/// Render the sensitivity table as text.
///
/// Deterministic byte-for-byte for a given result set: fixed header, tab
/// delimiters, six decimal places, `nan` for unresolved entries, trailing
/// newline.
pub fn format_sensitivity_table(results: &[SourceSensitivity]) -> String {
    let mut out = String::from(
        "# name\tch1_sens5(µJy)\tch2_sens5(µJy)\tch3_sens5(µJy)\tch4_sens5(µJy)\n",
    );

    for result in results {
        out.push_str(&result.name);
        for limit in &result.limits_ujy {
            out.push('\t');
            match limit {
                Some(value) => out.push_str(&format!("{value:.6}")),
                None => out.push_str("nan"),
            }
        }
        out.push('\n');
    }

    out
}

/// Write the sensitivity table to disk.
pub fn write_sensitivity_table(
    path: &Path,
    results: &[SourceSensitivity],
) -> Result<(), TableError> {
    fs::write(path, format_sensitivity_table(results))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_a_measurement_row() {
        let text = "SGR1806 270.1285 -20.4113 1 128.4 127.9 1000.0 3.05 0.12\n";
        let rows = parse_photometry_table(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "SGR1806");
        assert_eq!(rows[0].channel, 1);
        assert_relative_eq!(rows[0].ra_deg, 270.1285);
        assert_relative_eq!(rows[0].scale_factor, 1000.0);
        assert_relative_eq!(rows[0].phot_ujy, 3.05);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# circapphot results\n\n\
                    A 1.0 2.0 1 0.0 0.0 1000.0 3.0 0.1\n\
                    # trailing comment\n";
        let rows = parse_photometry_table(text).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn column_count_error_names_the_line() {
        let text = "# header\nA 1.0 2.0 1 0.0 0.0 1000.0\n";
        assert!(matches!(
            parse_photometry_table(text),
            Err(TableError::ColumnCount { line: 2, found: 7 })
        ));
    }

    #[test]
    fn bad_field_error_names_column_and_value() {
        let text = "A 1.0 2.0 one 0.0 0.0 1000.0 3.0 0.1\n";
        match parse_photometry_table(text) {
            Err(TableError::BadField { line, column, value }) => {
                assert_eq!(line, 1);
                assert_eq!(column, "channel");
                assert_eq!(value, "one");
            }
            other => panic!("expected BadField, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_channels_are_tolerated_at_parse_time() {
        let text = "A 1.0 2.0 7 0.0 0.0 1000.0 3.0 0.1\n";
        let rows = parse_photometry_table(text).unwrap();
        assert_eq!(rows[0].channel, 7);
    }

    #[test]
    fn formats_resolved_and_unresolved_cells() {
        let results = vec![
            SourceSensitivity {
                name: "A".to_string(),
                limits_ujy: [Some(2.0), None, None, Some(0.123456789)],
            },
            SourceSensitivity {
                name: "B".to_string(),
                limits_ujy: [None, None, None, None],
            },
        ];
        let text = format_sensitivity_table(&results);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("# name\tch1_sens5"));
        assert_eq!(lines[1], "A\t2.000000\tnan\tnan\t0.123457");
        assert_eq!(lines[2], "B\tnan\tnan\tnan\tnan");
        assert!(text.ends_with('\n'));
    }
}
