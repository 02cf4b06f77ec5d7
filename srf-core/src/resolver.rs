// srf-core/src/resolver.rs
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use srf_common::model::Artifact;
use srf_common::report::{AcquisitionReport, AcquisitionStatus};
use srf_net::transport::Transport;
use srf_net::verify::verify;
use tracing::{debug, error, info, warn};

use crate::chain::{ChainOutcome, StrategyChain};

/// Walks one artifact's candidate sources in priority order, running the
/// strategy chain for each until one yields a verified file.
pub struct Resolver {
    chain: StrategyChain,
}

impl Resolver {
    pub fn new(strategies: Vec<Arc<dyn Transport>>) -> Self {
        Self {
            chain: StrategyChain::new(strategies),
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.chain = self.chain.with_backoff(backoff);
        self
    }

    pub async fn resolve(&self, artifact: &Artifact, model_dir: &Path) -> AcquisitionReport {
        let dest = artifact.target_path(model_dir);

        // Idempotent re-runs are cheap: a destination that already passes
        // verification needs no network activity at all.
        if verify(&dest, artifact.min_size_bytes) {
            debug!("'{}' already exists and is valid", artifact.name);
            return AcquisitionReport {
                name: artifact.name.clone(),
                path: dest,
                status: AcquisitionStatus::AlreadyPresent,
            };
        }

        info!("Fetching '{}'", artifact.name);
        for (candidate_index, candidate) in artifact.candidates.iter().enumerate() {
            match self.chain.run(artifact, candidate, &dest).await {
                ChainOutcome::Success {
                    strategy,
                    strategy_index,
                } => {
                    info!(
                        "'{}' acquired via {} (candidate {}/{})",
                        artifact.name,
                        strategy,
                        candidate_index + 1,
                        artifact.candidates.len()
                    );
                    return AcquisitionReport {
                        name: artifact.name.clone(),
                        path: dest,
                        status: AcquisitionStatus::Acquired {
                            strategy,
                            strategy_index,
                            candidate_index,
                        },
                    };
                }
                ChainOutcome::Exhausted(failures) => {
                    warn!(
                        "Candidate {}/{} for '{}' exhausted after {} failed attempts",
                        candidate_index + 1,
                        artifact.candidates.len(),
                        artifact.name,
                        failures.len()
                    );
                    for failure in &failures {
                        debug!(
                            "  {}: {}",
                            failure.strategy(),
                            failure.reason()
                        );
                    }
                }
            }
        }

        error!("All candidates exhausted for '{}'", artifact.name);
        AcquisitionReport {
            name: artifact.name.clone(),
            path: dest,
            status: AcquisitionStatus::Failed,
        }
    }
}
