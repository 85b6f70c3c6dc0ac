//! Recursive directory copy

use crate::error::MergeError;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for [`copy_tree`]
#[derive(Debug, Clone, Default)]
pub(crate) struct CopyOptions {
    /// Recreate symlinks instead of copying what they point at
    pub(crate) preserve_symlinks: bool,
    /// Canonical directory never descended into (the copy destination when
    /// it lies inside the source)
    pub(crate) skip: Option<PathBuf>,
}

/// Copy the contents of `src` into the existing directory `dst`
///
/// Returns the number of non-directory entries copied.
pub(crate) fn copy_tree(src: &Path, dst: &Path, opts: &CopyOptions) -> Result<usize, MergeError> {
    let mut ancestors = vec![canonical(src)?];
    copy_dir_contents(src, dst, opts, &mut ancestors)
}

fn copy_dir_contents(
    src: &Path,
    dst: &Path,
    opts: &CopyOptions,
    ancestors: &mut Vec<PathBuf>,
) -> Result<usize, MergeError> {
    let mut count = 0;

    for entry in fs::read_dir(src).map_err(|e| MergeError::io(src, e))? {
        let entry = entry.map_err(|e| MergeError::io(src, e))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| MergeError::io(&src_path, e))?;

        if file_type.is_symlink() && opts.preserve_symlinks {
            copy_symlink(&src_path, &dst_path)?;
            count += 1;
            continue;
        }

        // Follows symlinks
        let meta = fs::metadata(&src_path).map_err(|e| MergeError::io(&src_path, e))?;
        if meta.is_dir() {
            let real = canonical(&src_path)?;
            if opts.skip.as_ref() == Some(&real) {
                continue;
            }
            if ancestors.contains(&real) {
                tracing::warn!(path = %src_path.display(), "skipping symlink cycle");
                continue;
            }
            fs::create_dir(&dst_path).map_err(|e| MergeError::io(&dst_path, e))?;
            ancestors.push(real);
            let copied = copy_dir_contents(&src_path, &dst_path, opts, ancestors);
            ancestors.pop();
            count += copied?;
        } else {
            fs::copy(&src_path, &dst_path).map_err(|e| MergeError::io(&dst_path, e))?;
            count += 1;
        }
    }

    Ok(count)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<(), MergeError> {
    let target = fs::read_link(src).map_err(|e| MergeError::io(src, e))?;
    std::os::unix::fs::symlink(&target, dst).map_err(|e| MergeError::io(dst, e))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> Result<(), MergeError> {
    fs::copy(src, dst).map(|_| ()).map_err(|e| MergeError::io(dst, e))
}

fn canonical(path: &Path) -> Result<PathBuf, MergeError> {
    fs::canonicalize(path).map_err(|e| MergeError::io(path, e))
}
