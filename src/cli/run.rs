use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

use crate::cli::{Cli, OutputFormat};
use crate::core::config::Config;
use crate::links::generator::{generate_links, LinkReport};
use crate::session::builder::{build_sessions, SessionReport};

/// What a run did, for the final summary
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub generated_at: String,
    pub outdir: PathBuf,
    pub links: Option<LinkReport>,
    pub sessions: Option<SessionReport>,
    pub errors: Vec<String>,
}

impl RunSummary {
    /// True if a phase failed or any individual link could not be created
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty() || self.links.as_ref().is_some_and(LinkReport::has_failures)
    }
}

/// Execute both phases.
///
/// A failed phase is logged and does not stop the next phase. Unless
/// `--strict` is set, failures never turn into an error exit.
///
/// An unusable config file is handled the same way: it is logged and the
/// run continues with the defaults plus command-line flags.
///
/// # Errors
///
/// With `--strict`, returns an error if the config file is unusable or if
/// anything failed.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut errors = Vec::new();
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) if cli.strict => return Err(e),
        Err(e) => {
            error!("Error while reading config file: {e}");
            errors.push(e.to_string());
            cli.apply_flags(Config::default())
        }
    };
    info!("Processing sample output directory {}", config.outdir.display());

    let mut summary = RunSummary {
        generated_at: chrono::Utc::now().to_rfc3339(),
        outdir: config.outdir.clone(),
        links: None,
        sessions: None,
        errors,
    };

    if !cli.skip_links {
        match generate_links(&config.outdir, &config.extra_links) {
            Ok(report) => summary.links = Some(report),
            Err(e) => {
                error!("Error while creating IGVnav links: {e}");
                summary.errors.push(e.to_string());
            }
        }
    }

    if !cli.skip_sessions {
        match build_sessions(&config.outdir, &config.snp_master, &config.sv_master) {
            Ok(report) => summary.sessions = Some(report),
            Err(e) => {
                error!("Error while creating session files: {e}");
                summary.errors.push(e.to_string());
            }
        }
    }

    match cli.format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    if cli.strict && summary.has_failures() {
        anyhow::bail!("igv-session finished with errors");
    }
    Ok(())
}

fn print_text_summary(summary: &RunSummary) {
    println!("Sample: {}", summary.outdir.display());

    if let Some(links) = &summary.links {
        println!(
            "Links:    {} created, {} already present, {} failed",
            links.created.len(),
            links.skipped,
            links.failed.len()
        );
        for failure in &links.failed {
            println!(
                "  failed: {} -> {} ({})",
                failure.destination.display(),
                failure.source.display(),
                failure.reason
            );
        }
    }

    if let Some(sessions) = &summary.sessions {
        for session in [&sessions.snp, &sessions.sv] {
            println!(
                "Session:  {} ({} resources, {} tracks)",
                session.path.display(),
                session.resources,
                session.tracks
            );
        }
    }

    for err in &summary.errors {
        println!("Error:    {err}");
    }
}
