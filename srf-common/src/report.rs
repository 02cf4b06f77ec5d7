// srf-common/src/report.rs
// Outcome types flowing back up from the acquisition pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One failed (strategy, candidate) attempt. Produced and consumed within
/// a single chain run; carried in the exhausted outcome for logging only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AttemptFailure {
    /// Network error, non-success status, subprocess non-zero exit or
    /// timeout. Errors are kept as strings for cheap cloning, like
    /// pipeline events.
    Transport { strategy: String, reason: String },
    /// Transport reported success but the file was missing or undersized.
    Verification { strategy: String, reason: String },
}

impl AttemptFailure {
    pub fn strategy(&self) -> &str {
        match self {
            AttemptFailure::Transport { strategy, .. } => strategy,
            AttemptFailure::Verification { strategy, .. } => strategy,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            AttemptFailure::Transport { reason, .. } => reason,
            AttemptFailure::Verification { reason, .. } => reason,
        }
    }
}

/// Final status for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcquisitionStatus {
    Acquired {
        strategy: String,
        strategy_index: usize,
        candidate_index: usize,
    },
    AlreadyPresent,
    Failed,
}

impl AcquisitionStatus {
    pub fn is_success(&self) -> bool {
        !matches!(self, AcquisitionStatus::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionReport {
    pub name: String,
    pub path: PathBuf,
    pub status: AcquisitionStatus,
}

/// Aggregated batch result; the only long-lived output of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    reports: Vec<AcquisitionReport>,
}

impl BatchSummary {
    pub fn new(reports: Vec<AcquisitionReport>) -> Self {
        Self { reports }
    }

    pub fn reports(&self) -> &[AcquisitionReport] {
        &self.reports
    }

    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn succeeded(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.status.is_success())
            .count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.reports.iter().all(|r| r.status.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &AcquisitionReport> {
        self.reports
            .iter()
            .filter(|r| r.status == AcquisitionStatus::Failed)
    }
}
