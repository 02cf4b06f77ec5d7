// srf-net/src/transport.rs
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use srf_common::error::Result;
use srf_common::model::{Artifact, CandidateSource};

use crate::http::{DriveFetch, MirrorProbe};
use crate::tool::ToolFetch;

/// One mechanism for moving bytes from a candidate source to a local
/// path. Implementations are stateless across invocations; any error
/// return is converted to a transport-failed outcome by the chain
/// executor, so nothing here should panic on network or subprocess
/// trouble.
#[async_trait]
pub trait Transport: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this transport can act on the candidate at all. Pairs that
    /// are structurally inapplicable (a session HTTP fetch handed a shell
    /// template, say) are skipped by the chain without counting as an
    /// attempt.
    fn supports(&self, _candidate: &CandidateSource) -> bool {
        true
    }

    /// Tries to place the artifact's bytes at `dest`. Writes or
    /// overwrites the destination file; on failure any partial output is
    /// left in place for the chain executor to clean up.
    async fn attempt(
        &self,
        artifact: &Artifact,
        candidate: &CandidateSource,
        dest: &Path,
    ) -> Result<()>;
}

/// The full strategy list in reliability-preference order: the session
/// HTTP fetch first, then the external tools, with mirror probing as the
/// last resort.
pub fn default_strategies(client: &Client) -> Vec<Arc<dyn Transport>> {
    vec![
        Arc::new(DriveFetch::new(client.clone())),
        Arc::new(ToolFetch::wget()),
        Arc::new(ToolFetch::curl()),
        Arc::new(MirrorProbe::new(client.clone())),
    ]
}
