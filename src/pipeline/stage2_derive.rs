use crate::input::DiffStats;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedRatios {
    pub subtraction_ratio: f64,
    pub doc_test_depth: f64,
}

pub fn run_stage2(stats: &DiffStats) -> DerivedRatios {
    DerivedRatios {
        subtraction_ratio: subtraction_ratio(stats.added_lines, stats.deleted_lines),
        doc_test_depth: doc_test_depth(
            stats.docs_touched,
            stats.tests_touched,
            stats.files_touched,
        ),
    }
}

/// Share of changed lines that are deletions. An empty diff is a valid,
/// poorly scoring input and yields 0.0 rather than an absent value.
pub fn subtraction_ratio(added: u64, deleted: u64) -> f64 {
    let total = added + deleted;
    if total == 0 {
        return 0.0;
    }
    deleted as f64 / total as f64
}

/// Docs plus tests touched per file touched; 0.0 when no files changed.
pub fn doc_test_depth(docs_touched: u64, tests_touched: u64, files_touched: u64) -> f64 {
    if files_touched == 0 {
        return 0.0;
    }
    (docs_touched + tests_touched) as f64 / files_touched as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_derive.rs"]
mod tests;
