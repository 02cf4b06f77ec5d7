// srf-common/src/lib.rs
pub mod config;
pub mod error;
pub mod model;
pub mod report;

// Re-export key types
pub use config::Config;
pub use error::{Result, SrfError};
pub use model::{Artifact, CandidateSource, Manifest, DEFAULT_MIN_SIZE_BYTES};
pub use report::{AcquisitionReport, AcquisitionStatus, AttemptFailure, BatchSummary};
