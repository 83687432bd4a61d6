use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::links::rules::{rules_with, LinkRule};
use crate::utils::fs::{absolutize, walk_files};

/// Name of the flat link directory inside a sample output directory
pub const LINK_DIR_NAME: &str = "IGVnav";

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Failed to resolve output directory {path}: {source}")]
    ResolveOutputDir { path: PathBuf, source: io::Error },

    #[error("Failed to create link directory {path}: {source}")]
    CreateLinkDir { path: PathBuf, source: io::Error },
}

/// A symlink that could not be created
#[derive(Debug, Clone, Serialize)]
pub struct LinkFailure {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub reason: String,
}

/// Outcome of a link generation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkReport {
    /// The `IGVnav` directory links were written to
    pub link_dir: PathBuf,
    /// Links created by this run, in creation order
    pub created: Vec<PathBuf>,
    /// Matching files whose basename was already present in the link directory
    pub skipped: usize,
    /// Links that failed to be created
    pub failed: Vec<LinkFailure>,
}

impl LinkReport {
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Path of the link directory for a sample output directory
#[must_use]
pub fn link_dir(output_dir: &Path) -> PathBuf {
    output_dir.join(LINK_DIR_NAME)
}

/// Link every file matching the built-in rules, then `extra_rules`, into
/// `<output_dir>/IGVnav`.
///
/// Links are named after the file's basename and point at its absolute path.
/// The first file found for a basename wins: later matches (from a later rule
/// or an earlier run) are skipped. A failure to create an individual link is
/// logged and recorded in the report. A directory that cannot be scanned
/// (missing, not a directory, unreadable) is skipped and the remaining rules
/// still run.
///
/// # Errors
///
/// Returns `LinkError::ResolveOutputDir` if the output directory cannot be
/// made absolute, or `LinkError::CreateLinkDir` if the link directory is
/// missing and cannot be created.
pub fn generate_links(output_dir: &Path, extra_rules: &[LinkRule]) -> Result<LinkReport, LinkError> {
    let src_root = absolutize(output_dir).map_err(|source| LinkError::ResolveOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let dst_dir = link_dir(&src_root);

    info!("Generating IGVnav links in {}", dst_dir.display());

    if !dst_dir.exists() {
        fs::create_dir(&dst_dir).map_err(|source| LinkError::CreateLinkDir {
            path: dst_dir.clone(),
            source,
        })?;
    }

    let mut report = LinkReport {
        link_dir: dst_dir.clone(),
        ..LinkReport::default()
    };

    for rule in rules_with(extra_rules) {
        let scan_dir = if rule.subdir.is_empty() {
            src_root.clone()
        } else {
            src_root.join(&rule.subdir)
        };

        for file in walk_files(&scan_dir) {
            let Some(name) = file.file_name() else {
                continue;
            };
            if !rule.matches(&name.to_string_lossy()) {
                continue;
            }

            let dst = dst_dir.join(name);
            if dst.exists() {
                debug!("Link {} already present, skipping", dst.display());
                report.skipped += 1;
                continue;
            }

            match make_symlink(&file, &dst) {
                Ok(()) => {
                    debug!("Linked {} -> {}", dst.display(), file.display());
                    report.created.push(dst);
                }
                Err(e) => {
                    warn!(
                        "Failed to link {} -> {}: {e}",
                        dst.display(),
                        file.display()
                    );
                    report.failed.push(LinkFailure {
                        source: file,
                        destination: dst,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    info!(
        "Created {} IGVnav links in {} ({} already present, {} failed)",
        report.created.len(),
        dst_dir.display(),
        report.skipped,
        report.failed.len()
    );

    Ok(report)
}

#[cfg(unix)]
fn make_symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(not(unix))]
fn make_symlink(_original: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are only supported on unix",
    ))
}
