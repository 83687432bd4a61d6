//! Filesystem helpers shared by the link generator and the session builder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Recursively collect regular-file entries under `root`, top-down.
///
/// Within each directory, entries are visited in name order and files are
/// reported before the directory's subdirectories are entered. Symbolic links
/// to directories are neither descended into nor reported; every other
/// non-directory entry (including dangling symlinks) is reported.
///
/// A directory that cannot be listed is skipped: a missing `root` quietly,
/// anything else with a warning. Files found elsewhere are still returned.
#[must_use]
pub fn walk_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_into(root, &mut files);
    files
}

fn walk_into(dir: &Path, files: &mut Vec<PathBuf>) {
    let mut entries = match read_entries(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Skipping {}: not found", dir.display());
            return;
        }
        Err(e) => {
            warn!("Skipping {}: {e}", dir.display());
            return;
        }
    };
    entries.sort_by_key(fs::DirEntry::file_name);

    let mut subdirs = Vec::new();
    for entry in entries {
        let path = entry.path();
        match entry.file_type() {
            Ok(t) if t.is_dir() => subdirs.push(path),
            // symlinked directories are not followed
            Ok(t) if t.is_symlink() && path.is_dir() => {}
            Ok(_) => files.push(path),
            Err(e) => warn!("Skipping {}: {e}", path.display()),
        }
    }

    for subdir in subdirs {
        walk_into(&subdir, files);
    }
}

fn read_entries(dir: &Path) -> io::Result<Vec<fs::DirEntry>> {
    fs::read_dir(dir)?.collect()
}

/// True if `path` (following symlinks) exists and has a non-zero size
#[must_use]
pub fn is_nonempty_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.len() > 0)
}

/// Resolve `path` against the current directory without touching symlinks.
///
/// # Errors
///
/// Returns an error if `path` is relative and the current directory cannot
/// be determined.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
