//! Filename classification into (variant type, file type) buckets.
//!
//! Rules are applied independently: a filename may land in several buckets,
//! or in none. The CFDNA/normal sibling rules partition files with a negative
//! lookahead, so files containing `CFDNA` only ever reach the `*_cfdna` bucket.

use fancy_regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

use crate::core::types::{Category, FileType, VariantType};

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Failed to list {path}: {source}")]
    ListDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Pattern for {category} failed on '{filename}': {source}")]
    Match {
        category: Category,
        filename: String,
        source: Box<fancy_regex::Error>,
    },
}

/// Rule table: bucket and the pattern its filenames must match from the start.
const RULE_TABLE: [(VariantType, FileType, &str); 14] = [
    (VariantType::BamCommon, FileType::BamNodups, r".*-nodups.bam$"),
    (VariantType::Sv, FileType::BamCfdna, r".*-CFDNA-.*(DEL|DUP|INV|TRA|contigs.sort).bam$"),
    (VariantType::Sv, FileType::BamNormal, r"^(?:(?!CFDNA).)*(DEL|DUP|INV|TRA|contigs.sort).bam$"),
    (VariantType::Sv, FileType::MutSvictCfdna, r".*-CFDNA-.*.svict_SR8.mut$"),
    (VariantType::Sv, FileType::MutSvictNormal, r"^(?:(?!CFDNA).)*.svict_SR8.mut$"),
    (VariantType::Sv, FileType::MutSava, r".*_(germline|somatic)_svaba.mut$"),
    (VariantType::Sv, FileType::MutSvcallerCfdna, r".*-CFDNA-.*_svcaller.mut$"),
    (VariantType::Sv, FileType::MutSvcallerNormal, r"^(?:(?!CFDNA).)*_svcaller.mut$"),
    (VariantType::Sv, FileType::MutLumpy, r".*lumpy_len500_SU24.mut$"),
    (VariantType::Sv, FileType::GtfCfdna, r".*-CFDNA-.*(DEL|DUP|INV|TRA).gtf$"),
    (VariantType::Sv, FileType::GtfNormal, r"^(?:(?!CFDNA).)*(DEL|DUP|INV|TRA).gtf$"),
    (VariantType::Snps, FileType::BamCfdna, r".*-CFDNA-.*clip.overlapped.bam$"),
    (VariantType::Snps, FileType::BamNormal, r"^(?:(?!CFDNA).)*clip.overlapped.bam$"),
    (VariantType::Snps, FileType::Vep, r".*.all.(somatic|germline).vep.vcf$"),
];

/// A compiled classification rule
#[derive(Debug)]
pub struct ClassificationRule {
    pub category: Category,
    pattern: Regex,
}

impl ClassificationRule {
    /// Whether `filename` matches this rule's pattern, anchored at the start.
    ///
    /// # Errors
    ///
    /// Returns an error if the backtracking engine gives up on the input.
    pub fn is_match(&self, filename: &str) -> Result<bool, fancy_regex::Error> {
        self.pattern.is_match(filename)
    }
}

/// The fixed, ordered classification rules
///
/// # Panics
///
/// Panics on first use if a built-in pattern fails to compile.
pub fn rules() -> &'static [ClassificationRule] {
    static RULES: OnceLock<Vec<ClassificationRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        RULE_TABLE
            .iter()
            .map(|&(variant, file, pattern)| ClassificationRule {
                category: Category::new(variant, file),
                pattern: Regex::new(&format!("^(?:{pattern})"))
                    .expect("built-in classification pattern is valid"),
            })
            .collect()
    })
}

/// Sorted filenames per bucket. Every rule's bucket is present, possibly empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassifiedFiles {
    buckets: BTreeMap<VariantType, BTreeMap<FileType, Vec<String>>>,
}

impl ClassifiedFiles {
    /// Filenames in a bucket, ascending; empty for unknown buckets
    #[must_use]
    pub fn files(&self, category: Category) -> &[String] {
        self.buckets
            .get(&category.variant)
            .and_then(|by_file| by_file.get(&category.file))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Classify an in-memory list of names.
    ///
    /// Names starting with `.` or ending with `.out` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ClassifyError::Match` if a pattern cannot be evaluated.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ClassifyError> {
        let candidates: Vec<&str> = names
            .iter()
            .map(AsRef::as_ref)
            .filter(|n| !n.starts_with('.') && !n.ends_with(".out"))
            .collect();

        let mut classified = Self::default();
        for rule in rules() {
            let mut matched = Vec::new();
            for name in &candidates {
                let hit = rule.is_match(name).map_err(|e| ClassifyError::Match {
                    category: rule.category,
                    filename: (*name).to_string(),
                    source: Box::new(e),
                })?;
                if hit {
                    matched.push((*name).to_string());
                }
            }
            matched.sort();
            debug!("{}: {} file(s)", rule.category, matched.len());

            classified
                .buckets
                .entry(rule.category.variant)
                .or_default()
                .insert(rule.category.file, matched);
        }
        Ok(classified)
    }

    /// Total filename placements across all buckets
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }
}

/// Classify the direct entries of `dir` (no recursion).
///
/// Entries whose names are not valid UTF-8 are ignored.
///
/// # Errors
///
/// Returns `ClassifyError::ListDir` if the directory cannot be read, or
/// `ClassifyError::Match` if a pattern cannot be evaluated.
pub fn classify(dir: &Path) -> Result<ClassifiedFiles, ClassifyError> {
    let list_err = |source: std::io::Error| ClassifyError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!("Ignoring non UTF-8 entry {raw:?}"),
        }
    }

    ClassifiedFiles::from_names(&names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(variant: VariantType, file: FileType) -> Category {
        Category::new(variant, file)
    }

    #[test]
    fn test_all_rules_compile() {
        assert_eq!(rules().len(), 14);
    }

    #[test]
    fn test_cfdna_partitioning() {
        let names = [
            "P-CFDNA-01_svcaller.mut",
            "P-N-01_svcaller.mut",
            "P-CFDNA-01.svict_SR8.mut",
            "P-N-01.svict_SR8.mut",
        ];
        let c = ClassifiedFiles::from_names(&names).unwrap();

        assert_eq!(
            c.files(cat(VariantType::Sv, FileType::MutSvcallerCfdna)),
            ["P-CFDNA-01_svcaller.mut"]
        );
        assert_eq!(
            c.files(cat(VariantType::Sv, FileType::MutSvcallerNormal)),
            ["P-N-01_svcaller.mut"]
        );
        assert_eq!(
            c.files(cat(VariantType::Sv, FileType::MutSvictCfdna)),
            ["P-CFDNA-01.svict_SR8.mut"]
        );
        assert_eq!(
            c.files(cat(VariantType::Sv, FileType::MutSvictNormal)),
            ["P-N-01.svict_SR8.mut"]
        );
    }

    #[test]
    fn test_sv_bams_and_gtfs() {
        let names = [
            "P-CFDNA-01_DEL.bam",
            "P-N-01_contigs.sort.bam",
            "P-CFDNA-01_TRA.gtf",
            "P-N-01_INV.gtf",
        ];
        let c = ClassifiedFiles::from_names(&names).unwrap();

        assert_eq!(c.files(cat(VariantType::Sv, FileType::BamCfdna)), ["P-CFDNA-01_DEL.bam"]);
        assert_eq!(
            c.files(cat(VariantType::Sv, FileType::BamNormal)),
            ["P-N-01_contigs.sort.bam"]
        );
        assert_eq!(c.files(cat(VariantType::Sv, FileType::GtfCfdna)), ["P-CFDNA-01_TRA.gtf"]);
        assert_eq!(c.files(cat(VariantType::Sv, FileType::GtfNormal)), ["P-N-01_INV.gtf"]);
    }

    #[test]
    fn test_buckets_are_sorted() {
        let names = ["c-nodups.bam", "a-nodups.bam", "b-nodups.bam"];
        let c = ClassifiedFiles::from_names(&names).unwrap();
        assert_eq!(
            c.files(cat(VariantType::BamCommon, FileType::BamNodups)),
            ["a-nodups.bam", "b-nodups.bam", "c-nodups.bam"]
        );
    }

    #[test]
    fn test_dots_match_any_character() {
        // Patterns leave `.` unescaped
        let names = ["P-nodups_bam", "P_all_somatic_vep_vcf"];
        let c = ClassifiedFiles::from_names(&names).unwrap();
        assert_eq!(
            c.files(cat(VariantType::BamCommon, FileType::BamNodups)),
            ["P-nodups_bam"]
        );
        assert_eq!(
            c.files(cat(VariantType::Snps, FileType::Vep)),
            ["P_all_somatic_vep_vcf"]
        );
    }

    #[test]
    fn test_match_is_anchored_at_end() {
        let names = ["P-nodups.bam.bai", "P-CFDNA-01_svcaller.mut.tbi"];
        let c = ClassifiedFiles::from_names(&names).unwrap();
        assert_eq!(c.total(), 0);
    }

    #[test]
    fn test_hidden_out_and_unmatched_are_excluded() {
        let names = [
            ".hidden-nodups.bam",
            "P.all.somatic.vep.vcf.out",
            "README.txt",
            "igv_session_sv.xml",
        ];
        let c = ClassifiedFiles::from_names(&names).unwrap();
        assert_eq!(c.total(), 0);
    }

    #[test]
    fn test_vep_and_snp_bams() {
        let names = [
            "P.all.germline.vep.vcf",
            "P.all.somatic.vep.vcf",
            "P.somatic.vep.vcf",
            "P-CFDNA-01.clip.overlapped.bam",
            "P-N-01.clip.overlapped.bam",
        ];
        let c = ClassifiedFiles::from_names(&names).unwrap();
        assert_eq!(
            c.files(cat(VariantType::Snps, FileType::Vep)),
            ["P.all.germline.vep.vcf", "P.all.somatic.vep.vcf"]
        );
        assert_eq!(
            c.files(cat(VariantType::Snps, FileType::BamCfdna)),
            ["P-CFDNA-01.clip.overlapped.bam"]
        );
        assert_eq!(
            c.files(cat(VariantType::Snps, FileType::BamNormal)),
            ["P-N-01.clip.overlapped.bam"]
        );
    }

    #[test]
    fn test_unknown_bucket_is_empty() {
        let c = ClassifiedFiles::from_names::<&str>(&[]).unwrap();
        assert!(c.files(cat(VariantType::Snps, FileType::MutLumpy)).is_empty());
    }

    #[test]
    fn test_classify_reads_direct_entries_only() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a-nodups.bam"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/b-nodups.bam"), "x").unwrap();

        let c = classify(dir.path()).unwrap();
        assert_eq!(
            c.files(cat(VariantType::BamCommon, FileType::BamNodups)),
            ["a-nodups.bam"]
        );
    }
}
