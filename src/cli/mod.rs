//! Command-line interface for igv-session.
//!
//! A single command runs two phases against a sample output directory:
//!
//! 1. **links**: symlink BAM, VCF, mutation, and GTF outputs into `IGVnav/`
//! 2. **sessions**: render `igv_session_snps.xml` and `igv_session_sv.xml`
//!
//! ## Usage
//!
//! ```text
//! # Link and render for one sample
//! igv-session --outdir /data/P-00123
//!
//! # Custom master templates and an extra link rule
//! igv-session --outdir /data/P-00123 \
//!     --snp-master snp.xml --sv-master sv.xml --link qc:.pdf
//!
//! # Fail the process if anything went wrong
//! igv-session --outdir /data/P-00123 --strict --format json
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::core::config::{Config, ConfigFile};
use crate::links::rules::LinkRule;

pub mod run;

#[derive(Parser, Debug)]
#[command(name = "igv-session")]
#[command(version)]
#[command(about = "Link sample outputs into IGVnav and build IGV session files")]
#[command(
    long_about = "igv-session prepares a sample output directory for review in IGV.\n\nIt symlinks BAM, VCF, mutation, and GTF outputs into a flat IGVnav directory and renders an SNV and an SV session file from master templates.\n\nFailures are logged and the process exits 0 unless --strict is given."
)]
pub struct Cli {
    /// Sample output directory [default: /tmp/autoseq-test]
    #[arg(long)]
    pub outdir: Option<PathBuf>,

    /// SNV session master template
    #[arg(long)]
    pub snp_master: Option<PathBuf>,

    /// SV session master template
    #[arg(long)]
    pub sv_master: Option<PathBuf>,

    /// Extra link rule, evaluated after the built-in rules (repeatable)
    #[arg(long = "link", value_name = "SUBDIR:SUFFIX")]
    pub links: Vec<LinkRule>,

    /// JSON config file (command-line flags take precedence)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Exit non-zero if either phase fails or any link cannot be created
    #[arg(long)]
    pub strict: bool,

    /// Do not create links
    #[arg(long)]
    pub skip_links: bool,

    /// Do not render session files
    #[arg(long)]
    pub skip_sessions: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Summary format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Resolve defaults, the optional config file, and flags into a `Config`
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::default();
        if let Some(path) = &self.config {
            let file = ConfigFile::load_from_file(path)
                .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
            config = config.with_file(file);
        }
        Ok(self.apply_flags(config))
    }

    /// Overlay command-line flags on `config`. `--link` rules are appended.
    #[must_use]
    pub fn apply_flags(&self, mut config: Config) -> Config {
        if let Some(outdir) = &self.outdir {
            config.outdir.clone_from(outdir);
        }
        if let Some(snp_master) = &self.snp_master {
            config.snp_master.clone_from(snp_master);
        }
        if let Some(sv_master) = &self.sv_master {
            config.sv_master.clone_from(sv_master);
        }
        config.extra_links.extend(self.links.iter().cloned());
        config
    }
}
