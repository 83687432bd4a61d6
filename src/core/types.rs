use serde::{Deserialize, Serialize};

/// Top-level grouping of a classified file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantType {
    /// Alignments shared by both sessions (deduplicated BAMs)
    BamCommon,
    /// Structural variants
    Sv,
    /// Small variants
    Snps,
}

impl VariantType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BamCommon => "bam_common",
            Self::Sv => "sv",
            Self::Snps => "snps",
        }
    }
}

impl std::fmt::Display for VariantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// File-type label within a variant type.
///
/// The label's prefix (`bam`, `mut`, `gtf`, `vep`) decides which XML
/// fragments a file contributes to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    BamNodups,
    BamCfdna,
    BamNormal,
    MutSvictCfdna,
    MutSvictNormal,
    MutSava,
    MutSvcallerCfdna,
    MutSvcallerNormal,
    MutLumpy,
    GtfCfdna,
    GtfNormal,
    Vep,
}

impl FileType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BamNodups => "bam_nodups",
            Self::BamCfdna => "bam_cfdna",
            Self::BamNormal => "bam_normal",
            Self::MutSvictCfdna => "mut_svict_cfdna",
            Self::MutSvictNormal => "mut_svict_normal",
            Self::MutSava => "mut_sava",
            Self::MutSvcallerCfdna => "mut_svcaller_cfdna",
            Self::MutSvcallerNormal => "mut_svcaller_normal",
            Self::MutLumpy => "mut_lumpy",
            Self::GtfCfdna => "gtf_cfdna",
            Self::GtfNormal => "gtf_normal",
            Self::Vep => "vep",
        }
    }

    /// Kind of track a file of this type renders as, decided by label prefix.
    #[must_use]
    pub fn track_kind(self) -> Option<TrackKind> {
        let label = self.as_str();
        if label.starts_with("bam") {
            Some(TrackKind::Alignment)
        } else if label.starts_with("mut") {
            Some(TrackKind::Mutation)
        } else if label.starts_with("gtf") {
            Some(TrackKind::Feature)
        } else if label.starts_with("vep") {
            Some(TrackKind::Variant)
        } else {
            None
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A (variant type, file type) bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Category {
    pub variant: VariantType,
    pub file: FileType,
}

impl Category {
    #[must_use]
    pub const fn new(variant: VariantType, file: FileType) -> Self {
        Self { variant, file }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.variant, self.file)
    }
}

/// XML fragment family a file contributes besides its resource entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    /// Coverage + junction + alignment tracks wrapped in a panel
    Alignment,
    /// `VariantTrack` for VEP-annotated VCFs
    Variant,
    /// `MutationTrack` for `.mut` files
    Mutation,
    /// `FeatureTrack` for `.gtf` files
    Feature,
}
