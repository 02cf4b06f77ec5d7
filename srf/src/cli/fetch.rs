//! Contains the logic for the `fetch` command.
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use srf_common::config::Config;
use srf_common::error::{Result, SrfError};
use srf_common::model::Manifest;
use srf_common::report::AcquisitionStatus;
use srf_core::orchestrator::Orchestrator;
use srf_core::resolver::Resolver;
use srf_net::http::build_http_client;
use srf_net::transport::default_strategies;

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Restrict the run to the named artifacts (default: all)
    pub names: Vec<String>,

    /// JSON manifest describing the artifacts to fetch
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Directory that receives the downloaded files
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

impl FetchArgs {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let manifest = match &self.manifest {
            Some(path) => Manifest::from_path(path)?,
            None => Manifest::builtin(),
        };
        let artifacts = manifest.select(&self.names)?;
        let model_dir = self
            .dir
            .clone()
            .unwrap_or_else(|| config.model_dir().to_path_buf());

        let client = build_http_client()?;
        let resolver = Resolver::new(default_strategies(&client));
        let orchestrator = Orchestrator::new(resolver, model_dir.clone());

        let summary = orchestrator.run_batch(&artifacts).await?;

        println!();
        for report in summary.reports() {
            match &report.status {
                AcquisitionStatus::Acquired { strategy, .. } => {
                    println!(
                        "{} {} (via {})",
                        "✓".green().bold(),
                        report.name,
                        strategy
                    );
                }
                AcquisitionStatus::AlreadyPresent => {
                    println!("{} {} (already present)", "✓".green().bold(), report.name);
                }
                AcquisitionStatus::Failed => {
                    println!("{} {}", "✗".red().bold(), report.name);
                }
            }
        }
        println!(
            "\nDownload summary: {}/{} models available",
            summary.succeeded(),
            summary.total()
        );

        if summary.all_succeeded() {
            return Ok(());
        }

        println!("\n{}", "Manual download instructions:".bold());
        for report in summary.failures() {
            let artifact = artifacts.iter().find(|a| a.name == report.name);
            match artifact.and_then(|a| a.manual_source.as_deref()) {
                Some(source) => println!("  {}: {}", report.name, source),
                None => println!("  {}: no known manual source", report.name),
            }
        }
        println!(
            "Place the downloaded files in the '{}' directory",
            model_dir.display()
        );

        Err(SrfError::Generic(format!(
            "{} of {} artifacts could not be downloaded",
            summary.total() - summary.succeeded(),
            summary.total()
        )))
    }
}
