use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::links::rules::LinkRule;
use crate::session::builder::{DEFAULT_SNP_MASTER, DEFAULT_SV_MASTER};

/// Default sample output directory
pub const DEFAULT_OUTDIR: &str = "/tmp/autoseq-test";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Optional settings read from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub outdir: Option<PathBuf>,
    pub snp_master: Option<PathBuf>,
    pub sv_master: Option<PathBuf>,
    #[serde(default)]
    pub extra_links: Vec<LinkRule>,
}

impl ConfigFile {
    /// Load a config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub outdir: PathBuf,
    pub snp_master: PathBuf,
    pub sv_master: PathBuf,
    pub extra_links: Vec<LinkRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            snp_master: PathBuf::from(DEFAULT_SNP_MASTER),
            sv_master: PathBuf::from(DEFAULT_SV_MASTER),
            extra_links: Vec::new(),
        }
    }
}

impl Config {
    /// Overlay a config file on the defaults. File link rules are appended.
    #[must_use]
    pub fn with_file(mut self, file: ConfigFile) -> Self {
        if let Some(outdir) = file.outdir {
            self.outdir = outdir;
        }
        if let Some(snp_master) = file.snp_master {
            self.snp_master = snp_master;
        }
        if let Some(sv_master) = file.sv_master {
            self.sv_master = sv_master;
        }
        self.extra_links.extend(file.extra_links);
        self
    }
}
