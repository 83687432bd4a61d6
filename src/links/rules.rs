use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A (subdirectory, filename suffix) pair selecting files to link.
///
/// The subdirectory is relative to the sample output directory; an empty
/// subdirectory means the output directory itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRule {
    #[serde(default)]
    pub subdir: String,
    pub suffix: String,
}

impl LinkRule {
    pub fn new(subdir: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            subdir: subdir.into(),
            suffix: suffix.into(),
        }
    }

    /// Whether a filename is selected by this rule
    #[must_use]
    pub fn matches(&self, filename: &str) -> bool {
        filename.ends_with(&self.suffix)
    }
}

impl std::fmt::Display for LinkRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.subdir, self.suffix)
    }
}

impl FromStr for LinkRule {
    type Err = String;

    /// Parse `SUBDIR:SUFFIX`. The split happens on the last `:` so
    /// subdirectories may contain colons; suffixes may not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (subdir, suffix) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected SUBDIR:SUFFIX, got '{s}'"))?;
        if suffix.is_empty() {
            return Err(format!("empty suffix in link rule '{s}'"));
        }
        Ok(Self::new(subdir, suffix))
    }
}

/// Built-in rules, evaluated in this order before any caller rules.
///
/// `variants:.vep.vcf` appears twice; the second pass only ever finds
/// files already linked by the first.
pub const BUILTIN_RULES: [(&str, &str); 11] = [
    ("variants", ".vep.vcf"),
    ("bams", "-nodups.bam"),
    ("bams", "-nodups.bam.bai"),
    ("bams", ".overlapped.bam"),
    ("bams", ".overlapped.bai"),
    ("variants", ".vep.vcf"),
    ("svs/igv", ".mut"),
    ("svs", ".gtf"),
    ("svs", ".bam"),
    ("svs", ".bai"),
    ("", "igvnav-input.txt"),
];

/// Built-in rules followed by `extra`, in evaluation order
#[must_use]
pub fn rules_with(extra: &[LinkRule]) -> Vec<LinkRule> {
    BUILTIN_RULES
        .iter()
        .map(|(subdir, suffix)| LinkRule::new(*subdir, *suffix))
        .chain(extra.iter().cloned())
        .collect()
}
