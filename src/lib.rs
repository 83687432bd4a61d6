//! # igv-session
//!
//! Prepare a sample's pipeline output directory for review in IGV.
//!
//! Two phases run in order:
//!
//! - **Link generation**: files under `variants/`, `bams/`, `svs/`, and
//!   `svs/igv/` whose names end in known suffixes are symlinked into a flat
//!   `IGVnav/` directory. The first file found for a name wins.
//! - **Session building**: the linked files are classified by name into
//!   (variant type, file type) buckets and rendered into
//!   `igv_session_snps.xml` and `igv_session_sv.xml` from master templates.
//!
//! ## Example
//!
//! ```rust,no_run
//! use igv_session::{build_sessions, generate_links};
//! use std::path::Path;
//!
//! let outdir = Path::new("/data/P-00123");
//! let links = generate_links(outdir, &[]).unwrap();
//! println!("{} links created", links.created.len());
//!
//! let sessions = build_sessions(
//!     outdir,
//!     Path::new("snp_master.xml"),
//!     Path::new("sv_master.xml"),
//! )
//! .unwrap();
//! println!("wrote {}", sessions.sv.path.display());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: labels, categories, and configuration
//! - [`links`]: link rules and the link generator
//! - [`session`]: classification, fragments, templates, and the session builder
//! - [`cli`]: command-line interface implementation

pub mod cli;
pub mod core;
pub mod links;
pub mod session;
pub mod utils;

pub use crate::core::config::Config;
pub use crate::core::types::{Category, FileType, TrackKind, VariantType};
pub use crate::links::generator::{generate_links, LinkError, LinkReport};
pub use crate::links::rules::LinkRule;
pub use crate::session::builder::{build_sessions, SessionError, SessionReport};
pub use crate::session::classify::{classify, ClassifiedFiles};
