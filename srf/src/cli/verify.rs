//! Contains the logic for the `verify` command: an offline pass of the
//! size-threshold check across the manifest.
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use srf_common::config::Config;
use srf_common::error::{Result, SrfError};
use srf_common::model::Manifest;
use srf_net::verify::verify;

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Restrict the check to the named artifacts (default: all)
    pub names: Vec<String>,

    /// JSON manifest describing the artifacts to check
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Directory holding the downloaded files
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

impl VerifyArgs {
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

        let mut missing = 0usize;
        for artifact in &artifacts {
            let path = artifact.target_path(&model_dir);
            if verify(&path, artifact.min_size_bytes) {
                println!("{} {}", "✓".green().bold(), artifact.name);
            } else {
                println!("{} {} (missing or undersized)", "✗".red().bold(), artifact.name);
                missing += 1;
            }
        }

        if missing == 0 {
            println!("\nAll {} artifacts present and valid", artifacts.len());
            Ok(())
        } else {
            Err(SrfError::Generic(format!(
                "{} of {} artifacts missing or invalid in {}",
                missing,
                artifacts.len(),
                model_dir.display()
            )))
        }
    }
}
