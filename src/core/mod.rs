//! Core types and run configuration.
//!
//! - [`types`]: variant/file-type labels, the [`types::Category`] bucket key,
//!   and the [`types::TrackKind`] a file renders as
//! - [`config`]: defaults and the optional JSON config file
//!
//! ## Labels
//!
//! | Variant type | File types |
//! |--------------|------------|
//! | bam_common   | bam_nodups |
//! | sv           | bam_cfdna, bam_normal, mut_*, gtf_cfdna, gtf_normal |
//! | snps         | bam_cfdna, bam_normal, vep |

pub mod config;
pub mod types;
