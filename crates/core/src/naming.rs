use std::path::{Path, PathBuf};

pub const DUPLICATE_MARKER: &str = "-duplicate";

/// `{canonical}.{ext}` where `ext` is the segment after the final dot of the
/// original name. Names without an extension get the bare timestamp.
pub fn target_file_name(original: &Path, canonical: &str) -> String {
    match original.extension() {
        Some(ext) if !ext.is_empty() => format!("{}.{}", canonical, ext.to_string_lossy()),
        _ => canonical.to_string(),
    }
}

/// Path next to `source` carrying its timestamp-derived name.
pub fn target_path(source: &Path, canonical: &str) -> PathBuf {
    source.with_file_name(target_file_name(source, canonical))
}

/// `n`-th alternate for a taken destination: `stem-duplicate.ext` for `n == 1`,
/// `stem-duplicate-{n}.ext` after that.
pub fn duplicate_candidate(destination: &Path, n: usize) -> PathBuf {
    let stem = destination
        .file_stem()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut name = if n <= 1 {
        format!("{}{}", stem, DUPLICATE_MARKER)
    } else {
        format!("{}{}-{}", stem, DUPLICATE_MARKER, n)
    };
    if let Some(ext) = destination.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    destination.with_file_name(name)
}
