// srf-core/src/orchestrator.rs
use std::fs;
use std::path::PathBuf;

use srf_common::error::{Result, SrfError};
use srf_common::model::Artifact;
use srf_common::report::BatchSummary;
use tracing::{info, warn};

use crate::resolver::Resolver;

/// Drives acquisition across a batch of artifacts. Artifacts share no
/// mutable state and are processed sequentially; within one artifact the
/// strategy/candidate order is strict because it encodes a reliability
/// preference and partial writes against one destination must never race.
pub struct Orchestrator {
    resolver: Resolver,
    model_dir: PathBuf,
}

impl Orchestrator {
    pub fn new(resolver: Resolver, model_dir: PathBuf) -> Self {
        Self {
            resolver,
            model_dir,
        }
    }

    /// Resolves every artifact and aggregates the reports. Acquisition
    /// failures never abort the batch; a summary is always produced.
    pub async fn run_batch(&self, artifacts: &[Artifact]) -> Result<BatchSummary> {
        fs::create_dir_all(&self.model_dir).map_err(|e| {
            SrfError::IoError(format!(
                "Failed to create model directory {}: {}",
                self.model_dir.display(),
                e
            ))
        })?;

        let mut reports = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            reports.push(self.resolver.resolve(artifact, &self.model_dir).await);
        }

        let summary = BatchSummary::new(reports);
        info!(
            "Download summary: {}/{} artifacts available",
            summary.succeeded(),
            summary.total()
        );
        for report in summary.failures() {
            match artifacts
                .iter()
                .find(|a| a.name == report.name)
                .and_then(|a| a.manual_source.as_deref())
            {
                Some(source) => warn!(
                    "'{}' could not be fetched; download it manually from {} and place it in {}",
                    report.name,
                    source,
                    self.model_dir.display()
                ),
                None => warn!("'{}' could not be fetched", report.name),
            }
        }

        Ok(summary)
    }
}
