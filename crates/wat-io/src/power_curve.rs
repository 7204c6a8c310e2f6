//! Raw turbine power-curve sample loader.
//!
//! One whitespace-delimited text file of (wind speed, ..., power) rows with
//! a single header line. Power is recorded in watts and converted to
//! megawatts on load.

use std::fs;
use std::path::Path;

use wat_core::{WatError, WatResult};

use crate::diagnostics::LoadDiagnostics;
use crate::measurements::decode_latin1;

/// Column layout of a power-curve sample file.
#[derive(Debug, Clone, Copy)]
pub struct PowerCurveFormat {
    /// Header lines to skip before data rows begin.
    pub skip_rows: usize,
    /// Zero-based index of the wind-speed column.
    pub speed_column: usize,
    /// Zero-based index of the power column.
    pub power_column: usize,
    /// Multiplier applied to the raw power value (W -> MW).
    pub power_scale: f64,
}

impl Default for PowerCurveFormat {
    fn default() -> Self {
        Self {
            skip_rows: 1,
            speed_column: 0,
            power_column: 2,
            power_scale: 1e-6,
        }
    }
}

/// Loaded power-curve samples plus their load diagnostics.
#[derive(Debug, Clone)]
pub struct PowerCurveSamples {
    /// (wind speed m/s, power MW) pairs in file order.
    pub samples: Vec<(f64, f64)>,
    /// Per-row issues.
    pub diagnostics: LoadDiagnostics,
}

/// Load (speed, power) samples from a single power-curve file.
///
/// Rows with missing or non-numeric columns are skipped with a warning;
/// the load fails only when the file is unreadable or yields no rows.
pub fn load_power_samples(path: &Path, format: &PowerCurveFormat) -> WatResult<PowerCurveSamples> {
    let bytes = fs::read(path)?;
    let text = decode_latin1(&bytes);

    let mut samples = Vec::new();
    let mut diagnostics = LoadDiagnostics::new();
    diagnostics.stats.files_read = 1;

    let widest = format.speed_column.max(format.power_column);

    for (line_no, line) in text.lines().enumerate().skip(format.skip_rows) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() <= widest {
            diagnostics.add_row_warning(
                "parse",
                &format!("row has {} columns, need at least {}", fields.len(), widest + 1),
                path,
                line_no + 1,
            );
            continue;
        }
        let speed = fields[format.speed_column].parse::<f64>();
        let power = fields[format.power_column].parse::<f64>();
        match (speed, power) {
            (Ok(v), Ok(p)) => {
                samples.push((v, p * format.power_scale));
                diagnostics.stats.rows_parsed += 1;
            }
            _ => {
                diagnostics.add_row_warning(
                    "parse",
                    &format!(
                        "non-numeric speed/power: '{}' / '{}'",
                        fields[format.speed_column], fields[format.power_column]
                    ),
                    path,
                    line_no + 1,
                );
            }
        }
    }

    if samples.is_empty() {
        return Err(WatError::Parse(format!(
            "no parseable power-curve rows in '{}'",
            path.display()
        )));
    }

    Ok(PowerCurveSamples {
        samples,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE: &[u8] = b"speed dir power\n\
        4.0 270 250000\n\
        8.0 265 1500000\n\
        12.0 260 3000000\n";

    fn write_file(dir: &TempDir, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join("curve.txt");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[test]
    fn loads_and_scales_watts_to_megawatts() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, SAMPLE);
        let result = load_power_samples(&path, &PowerCurveFormat::default()).unwrap();
        assert_eq!(result.samples.len(), 3);
        assert_eq!(result.samples[0], (4.0, 0.25));
        assert_eq!(result.samples[2], (12.0, 3.0));
        assert_eq!(result.diagnostics.stats.rows_parsed, 3);
    }

    #[test]
    fn skips_malformed_rows() {
        let dir = TempDir::new().unwrap();
        let mut content = SAMPLE.to_vec();
        content.extend_from_slice(b"bad row\n");
        content.extend_from_slice(b"16.0 255 x\n");
        content.extend_from_slice(b"20.0 250 3200000\n");
        let path = write_file(&dir, &content);
        let result = load_power_samples(&path, &PowerCurveFormat::default()).unwrap();
        assert_eq!(result.samples.len(), 4);
        assert_eq!(result.diagnostics.warning_count(), 2);
        assert_eq!(result.diagnostics.stats.rows_skipped, 2);
    }

    #[test]
    fn empty_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, b"header only\n");
        assert!(load_power_samples(&path, &PowerCurveFormat::default()).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");
        let err = load_power_samples(&path, &PowerCurveFormat::default()).unwrap_err();
        assert!(matches!(err, wat_core::WatError::Io(_)));
    }
}
