pub mod completions;
pub mod fit;
pub mod simulate;
pub mod zones;

use tracing::warn;
use wat_io::LoadDiagnostics;

/// Surface load issues in the log without failing the run.
pub fn report_diagnostics(diagnostics: &LoadDiagnostics) {
    for issue in &diagnostics.issues {
        match (&issue.path, issue.line) {
            (Some(path), Some(line)) => {
                warn!("{}:{line}: [{}] {}", path.display(), issue.category, issue.message)
            }
            (Some(path), None) => {
                warn!("{}: [{}] {}", path.display(), issue.category, issue.message)
            }
            _ => warn!("[{}] {}", issue.category, issue.message),
        }
    }
    if diagnostics.stats.rows_skipped > 0 || diagnostics.stats.files_skipped > 0 {
        warn!(
            "skipped {} row(s) and {} file(s); parsed {} row(s) from {} file(s)",
            diagnostics.stats.rows_skipped,
            diagnostics.stats.files_skipped,
            diagnostics.stats.rows_parsed,
            diagnostics.stats.files_read
        );
    }
}
