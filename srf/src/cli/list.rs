//! Contains the logic for the `list` command.
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use srf_common::config::Config;
use srf_common::error::Result;
use srf_common::model::Manifest;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// JSON manifest describing the artifacts
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

impl ListArgs {
    pub async fn run(&self, _config: &Config) -> Result<()> {
        let manifest = match &self.manifest {
            Some(path) => Manifest::from_path(path)?,
            None => Manifest::builtin(),
        };

        for artifact in &manifest.artifacts {
            println!("{}", artifact.name.bold());
            println!("  minimum size: {} bytes", artifact.min_size_bytes);
            println!(
                "  candidates:   {} source(s), {} mirror(s)",
                artifact.candidates.len(),
                artifact.mirrors.len()
            );
            if let Some(source) = &artifact.manual_source {
                println!("  manual:       {source}");
            }
        }
        Ok(())
    }
}
