use std::path::{Path, PathBuf};

/// File name with a trailing `.pdf` removed, ignoring case.
pub fn base_name(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let split = name.len().saturating_sub(4);
    match name.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => name[..split].to_string(),
        _ => name,
    }
}

/// PNG targets for a document of `page_count` pages, next to the source.
///
/// A single page becomes `B.png`; more pages become `B_1.png` .. `B_N.png`.
pub fn output_paths(source: &Path, page_count: usize) -> Vec<PathBuf> {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    let base = base_name(source);

    match page_count {
        0 => Vec::new(),
        1 => vec![dir.join(format!("{base}.png"))],
        n => (1..=n).map(|page| dir.join(format!("{base}_{page}.png"))).collect(),
    }
}
