use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Replace `dst` with a fresh recursive copy of `src`
///
/// Whatever was at `dst` before is removed first, so no stale file from a
/// previous run survives. Fails without touching anything if the two paths
/// overlap.
pub fn replace_tree(src: &Path, dst: &Path) -> Result<()> {
    ensure_disjoint(src, dst)?;
    remove_existing(dst)?;
    copy_tree(src, dst)
}

/// Fail if `src` and `dst` are the same path or one contains the other
pub fn ensure_disjoint(src: &Path, dst: &Path) -> Result<()> {
    let src_abs = absolute(src)?;
    let dst_abs = absolute(dst)?;

    if src_abs.starts_with(&dst_abs) || dst_abs.starts_with(&src_abs) {
        anyhow::bail!(
            "Refusing to copy {} into {}: source and destination overlap",
            src.display(),
            dst.display()
        );
    }

    Ok(())
}

/// Canonical form of `path`, which need not exist yet
///
/// The deepest existing ancestor is canonicalized and the missing
/// components are appended to it.
fn absolute(path: &Path) -> Result<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();

    while !existing.as_os_str().is_empty() && !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = if existing.as_os_str().is_empty() {
        std::env::current_dir().context("Failed to read current directory")?
    } else {
        existing
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", existing.display()))?
    };
    for name in missing.iter().rev() {
        resolved.push(name);
    }

    Ok(resolved)
}

/// Recursively copy `src` into `dst`, overwriting files that already exist
///
/// Existing files in `dst` that have no counterpart in `src` are kept.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    Ok(())
}

/// Copy every regular file directly inside `src_dir` into `dst_dir`
///
/// Subdirectories are ignored. Returns the number of files copied.
pub fn copy_top_level_files(src_dir: &Path, dst_dir: &Path) -> Result<usize> {
    let mut copied = 0;

    let entries =
        fs::read_dir(src_dir).with_context(|| format!("Failed to read {}", src_dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read {}", src_dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            copy_file(&path, &dst_dir.join(entry.file_name()))?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copy a single file, creating its parent directory if needed
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Remove `path` whether it is a directory or a file; missing is fine
pub fn remove_existing(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    } else if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}
