use std::path::PathBuf;
use std::process::Command;

use crate::input::{DiffSource, DiffStats, FileChange, InputError};

/// Reads diff counts by shelling out to `git diff` in `repo_dir`.
#[derive(Debug, Clone)]
pub struct GitDiffSource {
    repo_dir: PathBuf,
}

impl GitDiffSource {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    fn run_git(&self, args: &[&str]) -> Result<String, InputError> {
        tracing::debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()?;
        if !output.status.success() {
            return Err(InputError::Git {
                command: args.join(" "),
                repo_dir: self.repo_dir.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl DiffSource for GitDiffSource {
    fn diff_stats(&self, base: &str, head: &str) -> Result<DiffStats, InputError> {
        let range = format!("{base}...{head}");
        let names = self.run_git(&["diff", "--name-only", &range])?;
        let numstat = self.run_git(&["diff", "--numstat", &range])?;
        Ok(DiffStats::from_changes(
            parse_name_only(&names),
            parse_numstat(&numstat),
        ))
    }
}

/// Parses `git diff --numstat` output. Rows with fewer than three fields are
/// skipped; non-numeric counts (binary files report `-`) count as zero.
pub fn parse_numstat(text: &str) -> Vec<FileChange> {
    let mut out = Vec::new();
    for line in text.lines() {
        let mut parts = line.splitn(3, '\t');
        let (Some(added), Some(deleted), Some(path)) = (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        out.push(FileChange {
            path: path.to_string(),
            added: parse_count(added),
            deleted: parse_count(deleted),
        });
    }
    out
}

pub fn parse_name_only(text: &str) -> Vec<String> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_count(field: &str) -> u64 {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    field.parse().unwrap_or(0)
}
