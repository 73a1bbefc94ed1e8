use std::path::PathBuf;

pub mod classify;
pub mod diff;
pub mod github;

pub use classify::{is_doc, is_test};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("git {command} failed in {}: {stderr}", repo_dir.display())]
    Git {
        command: String,
        repo_dir: PathBuf,
        stderr: String,
    },
    #[error("HTTP request to {url} failed: {message}")]
    Http { url: String, message: String },
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub added: u64,
    pub deleted: u64,
}

/// Raw counts for one base/head comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub files: Vec<String>,
    pub per_file: Vec<FileChange>,
    pub files_touched: u64,
    pub added_lines: u64,
    pub deleted_lines: u64,
    pub docs_touched: u64,
    pub tests_touched: u64,
}

impl DiffStats {
    /// Builds the counts from the changed path list and the per-file
    /// numstat rows.
    pub fn from_changes(files: Vec<String>, per_file: Vec<FileChange>) -> Self {
        let added_lines = per_file.iter().map(|f| f.added).sum();
        let deleted_lines = per_file.iter().map(|f| f.deleted).sum();
        let docs_touched = files.iter().filter(|f| is_doc(f)).count() as u64;
        let tests_touched = files.iter().filter(|f| is_test(f)).count() as u64;
        Self {
            files_touched: files.len() as u64,
            files,
            per_file,
            added_lines,
            deleted_lines,
            docs_touched,
            tests_touched,
        }
    }

    pub fn total_changed(&self) -> u64 {
        self.added_lines + self.deleted_lines
    }
}

/// Optional review-cycle signals. Each field is `None` when its source was
/// not configured or could not be reached.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimingSignals {
    pub cycle_time_hours: Option<f64>,
    pub merge_velocity: Option<u64>,
    pub defect_recovery_hours: Option<f64>,
}

/// Supplies diff counts for a base/head pair. Failure is fatal to a run.
pub trait DiffSource {
    fn diff_stats(&self, base: &str, head: &str) -> Result<DiffStats, InputError>;
}

/// Supplies optional timing and velocity signals for one pull request.
pub trait SignalSource {
    fn cycle_time_hours(&self, pr_number: u64) -> Result<Option<f64>, InputError>;
    fn merge_velocity(&self, window_days: u32) -> Result<Option<u64>, InputError>;
}

/// Publishes a rendered summary somewhere outside the process.
pub trait ReportPublisher {
    fn publish(&self, pr_number: u64, body: &str) -> Result<(), InputError>;
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
