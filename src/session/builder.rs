use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::types::{Category, FileType, TrackKind, VariantType};
use crate::links::generator::link_dir;
use crate::session::classify::{classify, ClassifiedFiles, ClassifyError};
use crate::session::fragments;
use crate::session::template::{MasterTemplate, TemplateError};
use crate::utils::fs::{absolutize, is_nonempty_file};

/// Default location of the small-variant master template
pub const DEFAULT_SNP_MASTER: &str = "/nfs/PROBIO/for_igv/igv_session_master.xml";

/// Default location of the structural-variant master template
pub const DEFAULT_SV_MASTER: &str = "/nfs/PROBIO/for_igv/igv_session_sv_master.xml";

/// Output filename of the small-variant session
pub const SNP_SESSION_FILE: &str = "igv_session_snps.xml";

/// Output filename of the structural-variant session
pub const SV_SESSION_FILE: &str = "igv_session_sv.xml";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IGVnav directory not found: {0}")]
    MissingLinkDir(PathBuf),

    #[error("Failed to resolve output directory {path}: {source}")]
    ResolveOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{kind} master template: {source}")]
    Template {
        kind: SessionKind,
        source: TemplateError,
    },

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Which of the two session documents is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Snp,
    Sv,
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snp => write!(f, "SNV"),
            Self::Sv => write!(f, "SV"),
        }
    }
}

const SNP_CATEGORIES: [Category; 3] = [
    Category::new(VariantType::Snps, FileType::BamCfdna),
    Category::new(VariantType::Snps, FileType::BamNormal),
    Category::new(VariantType::Snps, FileType::Vep),
];

const SV_CATEGORIES: [Category; 11] = [
    Category::new(VariantType::BamCommon, FileType::BamNodups),
    Category::new(VariantType::Sv, FileType::BamCfdna),
    Category::new(VariantType::Sv, FileType::BamNormal),
    Category::new(VariantType::Sv, FileType::MutSvictCfdna),
    Category::new(VariantType::Sv, FileType::MutSvictNormal),
    Category::new(VariantType::Sv, FileType::MutSava),
    Category::new(VariantType::Sv, FileType::MutSvcallerCfdna),
    Category::new(VariantType::Sv, FileType::MutSvcallerNormal),
    Category::new(VariantType::Sv, FileType::MutLumpy),
    Category::new(VariantType::Sv, FileType::GtfCfdna),
    Category::new(VariantType::Sv, FileType::GtfNormal),
];

impl SessionKind {
    /// Categories contributing to this session, in output order
    #[must_use]
    pub fn categories(self) -> &'static [Category] {
        match self {
            Self::Snp => &SNP_CATEGORIES,
            Self::Sv => &SV_CATEGORIES,
        }
    }

    /// Panel (height, width) for alignment tracks
    #[must_use]
    pub fn panel_size(self) -> (u32, u32) {
        match self {
            Self::Snp => (250, 1800),
            Self::Sv => (150, 2543),
        }
    }

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Snp => SNP_SESSION_FILE,
            Self::Sv => SV_SESSION_FILE,
        }
    }

    /// Track kinds rendered by this session
    fn renders(self, kind: TrackKind) -> bool {
        match self {
            Self::Snp => matches!(kind, TrackKind::Alignment | TrackKind::Variant),
            Self::Sv => matches!(
                kind,
                TrackKind::Alignment | TrackKind::Mutation | TrackKind::Feature
            ),
        }
    }

    /// The SNV session lists a resource for every usable file, the SV
    /// session only for files it renders a track for.
    fn resource_requires_track(self) -> bool {
        matches!(self, Self::Sv)
    }
}

/// Accumulated fragments for one session document
#[derive(Debug, Clone, Default)]
pub struct SessionFragments {
    pub resources: String,
    pub panels: String,
    pub variant_tracks: String,
    pub mutation_tracks: String,
    pub feature_tracks: String,
    pub resource_count: usize,
    pub track_count: usize,
}

impl SessionFragments {
    /// Collect fragments for every existing, non-empty file of the session's
    /// categories, in category order then filename order.
    #[must_use]
    pub fn collect(kind: SessionKind, files: &ClassifiedFiles, link_dir: &Path) -> Self {
        let mut frags = Self::default();
        let (height, width) = kind.panel_size();

        for &category in kind.categories() {
            let track = category.file.track_kind().filter(|&k| kind.renders(k));

            for name in files.files(category) {
                let full_path = format!("{}/{name}", link_dir.display());
                if !is_nonempty_file(Path::new(&full_path)) {
                    debug!("Skipping {full_path}: missing or empty");
                    continue;
                }

                if track.is_some() || !kind.resource_requires_track() {
                    frags.resources.push_str(&fragments::resource(&full_path));
                    frags.resource_count += 1;
                }

                match track {
                    Some(TrackKind::Alignment) => {
                        let tracks = fragments::alignment_tracks(&full_path, name);
                        frags
                            .panels
                            .push_str(&fragments::panel(height, width, name, &tracks));
                    }
                    Some(TrackKind::Variant) => {
                        frags
                            .variant_tracks
                            .push_str(&fragments::variant_track(&full_path, name));
                    }
                    Some(TrackKind::Mutation) => {
                        frags
                            .mutation_tracks
                            .push_str(&fragments::mutation_track(&full_path, name));
                    }
                    Some(TrackKind::Feature) => {
                        frags
                            .feature_tracks
                            .push_str(&fragments::feature_track(&full_path, name));
                    }
                    None => {}
                }
                if track.is_some() {
                    frags.track_count += 1;
                }
            }
        }
        frags
    }

    /// Placeholder values for this session's master template
    #[must_use]
    pub fn placeholders(&self, kind: SessionKind) -> Vec<(&'static str, &str)> {
        let mut values = vec![
            ("add_resource", self.resources.as_str()),
            ("add_panel", self.panels.as_str()),
        ];
        match kind {
            SessionKind::Snp => values.push(("add_vcf_track", self.variant_tracks.as_str())),
            SessionKind::Sv => {
                values.push(("add_sv_mut_track", self.mutation_tracks.as_str()));
                values.push(("add_sv_gtf_track", self.feature_tracks.as_str()));
            }
        }
        values
    }
}

/// A session document written to disk
#[derive(Debug, Clone, Serialize)]
pub struct WrittenSession {
    pub kind: SessionKind,
    pub path: PathBuf,
    pub resources: usize,
    pub tracks: usize,
}

/// Outcome of a session build
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub snp: WrittenSession,
    pub sv: WrittenSession,
}

/// Render `igv_session_snps.xml` and `igv_session_sv.xml` into
/// `<output_dir>/IGVnav` from the files linked there.
///
/// Both documents are rendered before either is written. Existing session
/// files are overwritten.
///
/// # Errors
///
/// Returns `SessionError::MissingLinkDir` if the link directory does not
/// exist, `SessionError::Template` if a master template is missing, empty,
/// unreadable, or malformed, `SessionError::Classify` if the link directory
/// cannot be read, or `SessionError::Write` if an output file cannot be
/// written. A write failure on the SV session leaves the SNV session in place.
pub fn build_sessions(
    output_dir: &Path,
    snp_master: &Path,
    sv_master: &Path,
) -> Result<SessionReport, SessionError> {
    info!("Generating IGV session files");

    let output_dir = absolutize(output_dir).map_err(|source| SessionError::ResolveOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let link_dir = link_dir(&output_dir);
    if !link_dir.is_dir() {
        return Err(SessionError::MissingLinkDir(link_dir));
    }

    let load = |kind, path: &Path| {
        MasterTemplate::load(path).map_err(|source| SessionError::Template { kind, source })
    };
    let snp_template = load(SessionKind::Snp, snp_master)?;
    let sv_template = load(SessionKind::Sv, sv_master)?;

    let files = classify(&link_dir)?;
    debug!("Classified {} file placement(s)", files.total());

    let snp = render_session(SessionKind::Snp, &snp_template, &files, &link_dir)?;
    let sv = render_session(SessionKind::Sv, &sv_template, &files, &link_dir)?;

    let snp = write_session(SessionKind::Snp, snp, &link_dir)?;
    let sv = write_session(SessionKind::Sv, sv, &link_dir)?;

    Ok(SessionReport { snp, sv })
}

fn render_session(
    kind: SessionKind,
    template: &MasterTemplate,
    files: &ClassifiedFiles,
    link_dir: &Path,
) -> Result<(String, SessionFragments), SessionError> {
    let frags = SessionFragments::collect(kind, files, link_dir);
    let text = template
        .render(&frags.placeholders(kind))
        .map_err(|source| SessionError::Template { kind, source })?;
    Ok((text, frags))
}

fn write_session(
    kind: SessionKind,
    (text, frags): (String, SessionFragments),
    link_dir: &Path,
) -> Result<WrittenSession, SessionError> {
    let path = link_dir.join(kind.file_name());
    std::fs::write(&path, text).map_err(|source| SessionError::Write {
        path: path.clone(),
        source,
    })?;
    info!(
        "Wrote {kind} session {} ({} resources, {} tracks)",
        path.display(),
        frags.resource_count,
        frags.track_count
    );
    Ok(WrittenSession {
        kind,
        path,
        resources: frags.resource_count,
        tracks: frags.track_count,
    })
}
