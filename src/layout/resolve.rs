use std::path::{Path, PathBuf};

/// Return the first candidate accepted by `predicate`
///
/// Candidates are checked in order and nothing is written, so this can be
/// used both for planning and for the actual copy.
pub fn resolve_first_existing<P>(candidates: &[PathBuf], predicate: P) -> Option<PathBuf>
where
    P: Fn(&Path) -> bool,
{
    candidates
        .iter()
        .find(|candidate| predicate(candidate))
        .cloned()
}

/// Predicate for directory artifacts (classes, layout, libs)
pub fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

/// Predicate for file artifacts (manifest)
pub fn is_file(path: &Path) -> bool {
    path.is_file()
}
