use crate::input::{DiffSource, DiffStats, InputError, is_doc, is_test};

/// Reads the diff for `base...head`. There is no meaningful score without
/// it, so errors propagate to the caller unchanged.
pub fn run_stage1(source: &dyn DiffSource, base: &str, head: &str) -> Result<DiffStats, InputError> {
    let stats = source.diff_stats(base, head)?;
    for change in &stats.per_file {
        tracing::debug!("{}\t+{}\t-{}", change.path, change.added, change.deleted);
    }
    for path in stats.files.iter().filter(|p| is_doc(p) || is_test(p)) {
        tracing::debug!("doc/test file: {path}");
    }
    tracing::info!(
        "diff {base}...{head}: {} files, +{}/-{} lines, {} docs, {} tests",
        stats.files_touched,
        stats.added_lines,
        stats.deleted_lines,
        stats.docs_touched,
        stats.tests_touched
    );
    Ok(stats)
}
