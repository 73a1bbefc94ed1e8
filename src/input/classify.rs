/// Documentation paths: anything under `docs/` or with a markup extension.
pub fn is_doc(path: &str) -> bool {
    let p = path.to_ascii_lowercase();
    p.starts_with("docs/") || p.ends_with(".md") || p.ends_with(".rst") || p.ends_with(".mdx")
}

/// Test paths: a `tests/` directory at any depth, or a `test_*` / `*_test.py`
/// file name.
pub fn is_test(path: &str) -> bool {
    let normalized = path.replace('\\', "/").to_ascii_lowercase();
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    format!("/{normalized}").contains("/tests/")
        || base.starts_with("test_")
        || base.ends_with("_test.py")
}
