use std::path::PathBuf;

use serde::Serialize;

/// Severity level for load issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning, // Unusual but loaded (e.g., non-numeric row skipped)
    Error,   // Could not load a file at all
}

/// A single issue encountered while loading a measurement batch
#[derive(Debug, Clone, Serialize)]
pub struct LoadIssue {
    pub severity: Severity,
    pub category: String, // "io", "parse", "encoding"
    pub message: String,  // "row 17: column 3 is not a number"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>, // Originating file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>, // 1-based line number within the file
}

/// Statistics about a load batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
    pub files_read: usize,
    pub files_skipped: usize,
    pub rows_parsed: usize,
    pub rows_skipped: usize,
}

/// Complete diagnostics for a load operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadDiagnostics {
    pub stats: LoadStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<LoadIssue>,
}

impl LoadDiagnostics {
    /// Create new empty diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning issue
    pub fn add_warning(&mut self, category: &str, message: &str) {
        self.issues.push(LoadIssue {
            severity: Severity::Warning,
            category: category.to_string(),
            message: message.to_string(),
            path: None,
            line: None,
        });
    }

    /// Add a warning for a skipped row within a file
    pub fn add_row_warning(&mut self, category: &str, message: &str, path: &std::path::Path, line: usize) {
        self.issues.push(LoadIssue {
            severity: Severity::Warning,
            category: category.to_string(),
            message: message.to_string(),
            path: Some(path.to_path_buf()),
            line: Some(line),
        });
        self.stats.rows_skipped += 1;
    }

    /// Add an error for a file that could not be loaded
    pub fn add_file_error(&mut self, category: &str, message: &str, path: &std::path::Path) {
        self.issues.push(LoadIssue {
            severity: Severity::Error,
            category: category.to_string(),
            message: message.to_string(),
            path: Some(path.to_path_buf()),
            line: None,
        });
        self.stats.files_skipped += 1;
    }

    /// Count warnings
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Count errors
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Check if there are any issues
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Merge another diagnostics into this one (for multi-file batches)
    pub fn merge(&mut self, other: LoadDiagnostics) {
        self.issues.extend(other.issues);
        self.stats.files_read += other.stats.files_read;
        self.stats.files_skipped += other.stats.files_skipped;
        self.stats.rows_parsed += other.stats.rows_parsed;
        self.stats.rows_skipped += other.stats.rows_skipped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_diagnostics_counts() {
        let mut diag = LoadDiagnostics::new();
        diag.add_warning("parse", "test warning");
        diag.add_file_error("io", "test error", Path::new("a.txt"));
        diag.add_row_warning("parse", "row warning", Path::new("a.txt"), 42);

        assert_eq!(diag.warning_count(), 2);
        assert_eq!(diag.error_count(), 1);
        assert!(diag.has_issues());
        assert_eq!(diag.stats.rows_skipped, 1);
        assert_eq!(diag.stats.files_skipped, 1);
    }

    #[test]
    fn test_diagnostics_merge_accumulates_stats() {
        let mut a = LoadDiagnostics::new();
        a.stats.files_read = 2;
        a.stats.rows_parsed = 100;

        let mut b = LoadDiagnostics::new();
        b.stats.files_read = 1;
        b.stats.rows_parsed = 50;
        b.add_row_warning("parse", "bad row", Path::new("b.txt"), 7);

        a.merge(b);
        assert_eq!(a.stats.files_read, 3);
        assert_eq!(a.stats.rows_parsed, 150);
        assert_eq!(a.stats.rows_skipped, 1);
        assert_eq!(a.warning_count(), 1);
    }

    #[test]
    fn test_diagnostics_serialization() {
        let mut diag = LoadDiagnostics::new();
        diag.stats.files_read = 3;
        diag.stats.rows_parsed = 8760;
        diag.add_row_warning("parse", "column 3 is not a number", Path::new("jan.txt"), 47);

        let json = serde_json::to_string_pretty(&diag).unwrap();
        assert!(json.contains("\"files_read\": 3"));
        assert!(json.contains("\"warning\""));
        assert!(json.contains("\"line\": 47"));
    }
}
