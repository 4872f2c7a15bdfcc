//! Context document merge
//!
//! Remote notes are appended below the local ones under a provenance header.
//! A remote document whose trimmed text already appears in the local one is
//! treated as merged, which makes repeated pulls idempotent.

/// Outcome of merging one remote context document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextMerge {
    /// Remote text is already contained in the local document
    AlreadyMerged,
    /// New local content
    Appended(String),
}

/// Header line placed above appended remote content
pub fn provenance_header(source: &str) -> String {
    format!("# Merged from {}", source)
}

/// Merge `remote` into `local`, labelling the appended section with `source`.
pub fn merge_context(local: &str, remote: &str, source: &str) -> ContextMerge {
    if local.contains(remote.trim()) {
        return ContextMerge::AlreadyMerged;
    }

    let header = provenance_header(source);
    let mut merged = String::with_capacity(local.len() + header.len() + remote.len() + 4);
    merged.push_str(local);
    merged.push_str("\n\n");
    merged.push_str(&header);
    merged.push_str("\n\n");
    merged.push_str(remote);
    ContextMerge::Appended(merged)
}
