//! Wind-speed measurement file loader.
//!
//! Station exports are whitespace-delimited text with a two-line header and
//! the wind speed in a fixed column. Files are Latin-1; each byte maps to
//! exactly one code point, so decoding never fails.

use std::fs;
use std::path::{Path, PathBuf};

use wat_core::{WatError, WatResult};

use crate::diagnostics::LoadDiagnostics;

/// Column layout of a measurement file.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementFormat {
    /// Header lines to skip before data rows begin.
    pub skip_rows: usize,
    /// Zero-based index of the wind-speed column.
    pub speed_column: usize,
}

impl Default for MeasurementFormat {
    /// The station export layout: two header lines, speed in column 3.
    fn default() -> Self {
        Self {
            skip_rows: 2,
            speed_column: 3,
        }
    }
}

/// Outcome of a measurement batch load.
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// All wind speeds, in file order.
    pub speeds: Vec<f64>,
    /// Per-file and per-row issues.
    pub diagnostics: LoadDiagnostics,
}

/// Decode a Latin-1 byte buffer into a `String`.
///
/// Every byte maps directly to the code point of the same value, so this
/// is total: no input can fail to decode.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// List the `.txt` measurement files in `dir`, sorted by name.
pub fn discover_measurement_files(dir: &Path) -> WatResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file() && p.extension().map(|ext| ext == "txt").unwrap_or(false)
        })
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(WatError::Validation(format!(
            "no .txt measurement files in '{}'",
            dir.display()
        )));
    }
    Ok(files)
}

/// Load wind speeds from a batch of measurement files.
///
/// A file that cannot be read is skipped with an error issue; a data row
/// whose speed column is missing or non-numeric is skipped with a warning
/// issue. The batch only fails outright when no file yields any rows.
pub fn load_wind_speeds(paths: &[PathBuf], format: &MeasurementFormat) -> WatResult<LoadResult> {
    if paths.is_empty() {
        return Err(WatError::Validation("no measurement files given".into()));
    }

    let mut speeds = Vec::new();
    let mut diagnostics = LoadDiagnostics::new();

    for path in paths {
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                diagnostics.add_file_error("io", &format!("cannot read: {e}"), path);
                continue;
            }
        };
        diagnostics.stats.files_read += 1;
        let text = decode_latin1(&bytes);

        for (line_no, line) in text.lines().enumerate().skip(format.skip_rows) {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.get(format.speed_column).map(|f| f.parse::<f64>()) {
                Some(Ok(v)) => {
                    speeds.push(v);
                    diagnostics.stats.rows_parsed += 1;
                }
                Some(Err(_)) => {
                    diagnostics.add_row_warning(
                        "parse",
                        &format!(
                            "column {} is not a number: '{}'",
                            format.speed_column, fields[format.speed_column]
                        ),
                        path,
                        line_no + 1,
                    );
                }
                None => {
                    diagnostics.add_row_warning(
                        "parse",
                        &format!(
                            "row has {} columns, need at least {}",
                            fields.len(),
                            format.speed_column + 1
                        ),
                        path,
                        line_no + 1,
                    );
                }
            }
        }
    }

    if speeds.is_empty() {
        return Err(WatError::Parse(format!(
            "no parseable measurement rows in {} file(s)",
            paths.len()
        )));
    }

    Ok(LoadResult {
        speeds,
        diagnostics,
    })
}
