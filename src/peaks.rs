//! Parsing ChIP-seq peak tables into per-TF intervals.
//!
//! The table is tab-delimited with a header row naming at least `TF_name`,
//! `Peak_start` and `Peak_end`. Columns are looked up by name, so their order
//! and any extra columns do not matter. Only file-level problems are fatal;
//! every bad row is counted in [`PeakStats`], reported through the sink and
//! dropped.

use crate::{
    consts::{DELIMITER, PEAK_END_COLUMN, PEAK_START_COLUMN, REQUIRED_COLUMNS, TF_NAME_COLUMN},
    error::{ExtractError, Result},
    input::{next_line, open_input, trim_newline},
    sink::Sink,
    types::{PeakInterval, TfCoordinates},
};

use std::{fmt, path::Path};

const WHAT: &str = "peaks file";

/// Per-parse counters. `total_peaks == valid_peaks + invalid_peaks` holds
/// after every parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeakStats {
    /// Data lines read, blank ones included
    pub total_lines: usize,
    /// Non-blank data rows
    pub total_peaks: usize,
    pub valid_peaks: usize,
    pub invalid_peaks: usize,
    /// Negative or inverted coordinates
    pub coordinate_errors: usize,
    /// Rows with too few fields
    pub structure_errors: usize,
    /// Non-numeric coordinates
    pub format_errors: usize,
    pub blank_lines: usize,
    pub blank_fields: usize,
}

impl fmt::Display for PeakStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total_lines={}, valid_peaks={}, invalid_peaks={}, warnings: blank_lines={}, blank_fields={}; errors: coordinates={}, structure={}, format={}",
            self.total_lines,
            self.valid_peaks,
            self.invalid_peaks,
            self.blank_lines,
            self.blank_fields,
            self.coordinate_errors,
            self.structure_errors,
            self.format_errors,
        )
    }
}

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    tf: usize,
    start: usize,
    end: usize,
}

impl Columns {
    /// Number of fields a row needs to reach every required column.
    fn needed(&self) -> usize {
        self.tf.max(self.start).max(self.end) + 1
    }
}

/// Why a non-blank row was rejected.
#[derive(Debug, Clone, PartialEq)]
enum RowIssue {
    TooFewFields { found: usize, needed: usize },
    BlankField,
    BadNumber { start: String, end: String },
    Negative { start: i64, end: i64 },
    Inverted { start: i64, end: i64 },
}

/// Parses the peaks table at `path` into TF -> intervals.
///
/// The summary statistics are reported through `sink`; use
/// [`parse_peaks_with_stats`] to get them back as a value.
///
/// # Example
///
/// ```rust,ignore
/// use tfbs_extract::{parse_peaks, LogSink};
///
/// let coords = parse_peaks("peaks.tsv", &LogSink::default())?;
/// for (tf, peaks) in coords.iter() {
///     println!("{tf}: {} peaks", peaks.len());
/// }
/// ```
pub fn parse_peaks<P: AsRef<Path>>(path: P, sink: &dyn Sink) -> Result<TfCoordinates> {
    parse_peaks_with_stats(path, sink).map(|(coords, _)| coords)
}

/// Same as [`parse_peaks`], also returning the per-category counters.
///
/// # Errors
///
/// - [`ExtractError::NotFound`] if `path` is not a regular file
/// - [`ExtractError::Format`] if any required column is missing from the
///   header (the message lists them), or if the file cannot be decoded
pub fn parse_peaks_with_stats<P: AsRef<Path>>(
    path: P,
    sink: &dyn Sink,
) -> Result<(TfCoordinates, PeakStats)> {
    let path = path.as_ref();
    sink.info(format_args!("Reading peaks from file {}", path.display()));

    let mut reader = open_input(path, WHAT).inspect_err(|e| sink.error(format_args!("{}", e)))?;
    let mut line = String::new();

    let header = if next_line(reader.as_mut(), &mut line, path, WHAT)
        .inspect_err(|e| sink.error(format_args!("{}", e)))?
    {
        trim_newline(&line).to_string()
    } else {
        String::new()
    };
    let columns = locate_columns(&header)
        .map_err(|missing| {
            ExtractError::format(
                path,
                format!("missing required columns: {}", missing.join(", ")),
            )
        })
        .inspect_err(|e| sink.error(format_args!("{}", e)))?;

    let mut coords = TfCoordinates::new();
    let mut stats = PeakStats::default();
    let mut line_no = 1usize;

    while next_line(reader.as_mut(), &mut line, path, WHAT)
        .inspect_err(|e| sink.error(format_args!("{}", e)))?
    {
        line_no += 1;
        stats.total_lines += 1;

        let row = trim_newline(&line);
        if row.trim().is_empty() {
            stats.blank_lines += 1;
            sink.debug(format_args!("Line {}: blank, skipping", line_no));
            continue;
        }

        stats.total_peaks += 1;

        match parse_row(row, &columns) {
            Ok((tf, interval)) => {
                coords.push(tf, interval);
                stats.valid_peaks += 1;
            }
            Err(issue) => {
                stats.invalid_peaks += 1;
                report(&issue, line_no, &mut stats, sink);
            }
        }
    }

    sink.info(format_args!(
        "Peaks summary for {}: {}",
        path.display(),
        stats
    ));

    Ok((coords, stats))
}

/// Finds the required columns in the header, or returns the missing names.
fn locate_columns(header: &str) -> std::result::Result<Columns, Vec<&'static str>> {
    let names: Vec<&str> = header.split(DELIMITER).map(str::trim).collect();
    let find = |col: &str| names.iter().position(|name| *name == col);

    match (
        find(TF_NAME_COLUMN),
        find(PEAK_START_COLUMN),
        find(PEAK_END_COLUMN),
    ) {
        (Some(tf), Some(start), Some(end)) => Ok(Columns { tf, start, end }),
        _ => Err(REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| find(*col).is_none())
            .collect()),
    }
}

/// Validates one non-blank row.
fn parse_row<'a>(
    row: &'a str,
    columns: &Columns,
) -> std::result::Result<(&'a str, PeakInterval), RowIssue> {
    let fields: Vec<&str> = row.split(DELIMITER).collect();
    if fields.len() < columns.needed() {
        return Err(RowIssue::TooFewFields {
            found: fields.len(),
            needed: columns.needed(),
        });
    }

    let tf = fields[columns.tf].trim();
    let raw_start = fields[columns.start].trim();
    let raw_end = fields[columns.end].trim();

    if tf.is_empty() || raw_start.is_empty() || raw_end.is_empty() {
        return Err(RowIssue::BlankField);
    }

    let (start, end) = match (parse_coordinate(raw_start), parse_coordinate(raw_end)) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(RowIssue::BadNumber {
                start: raw_start.to_string(),
                end: raw_end.to_string(),
            });
        }
    };

    if start < 0 || end < 0 {
        return Err(RowIssue::Negative { start, end });
    }

    if start >= end {
        return Err(RowIssue::Inverted { start, end });
    }

    Ok((tf, PeakInterval::new(start as usize, end as usize)))
}

/// Parses decimal text, truncating any fractional part toward zero
/// (`"200.9"` -> `200`, `"-0.5"` -> `0`).
fn parse_coordinate(raw: &str) -> Option<i64> {
    let value: f64 = raw.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(value.trunc() as i64)
}

fn report(issue: &RowIssue, line_no: usize, stats: &mut PeakStats, sink: &dyn Sink) {
    match issue {
        RowIssue::TooFewFields { found, needed } => {
            stats.structure_errors += 1;
            sink.warn(format_args!(
                "Line {}: insufficient fields ({} of {}), skipping",
                line_no, found, needed
            ));
        }
        RowIssue::BlankField => {
            stats.blank_fields += 1;
            sink.warn(format_args!("Line {}: blank fields, skipping", line_no));
        }
        RowIssue::BadNumber { start, end } => {
            stats.format_errors += 1;
            sink.warn(format_args!(
                "Line {}: malformed coordinates ({:?}, {:?}), skipping",
                line_no, start, end
            ));
        }
        RowIssue::Negative { start, end } => {
            stats.coordinate_errors += 1;
            sink.warn(format_args!(
                "Line {}: negative coordinate ({}, {}), skipping",
                line_no, start, end
            ));
        }
        RowIssue::Inverted { start, end } => {
            stats.coordinate_errors += 1;
            sink.warn(format_args!(
                "Line {}: start >= end ({} >= {}), skipping",
                line_no, start, end
            ));
        }
    }
}
