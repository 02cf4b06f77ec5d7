// srf-core/src/chain.rs
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use srf_common::model::{Artifact, CandidateSource};
use srf_common::report::AttemptFailure;
use srf_net::transport::Transport;
use srf_net::verify::verify;
use tracing::{debug, warn};

/// Pause between strategies so flaky hosts are not hammered back to back.
pub const STRATEGY_BACKOFF: Duration = Duration::from_secs(2);

/// Result of running one candidate through the full strategy list.
#[derive(Debug)]
pub enum ChainOutcome {
    Success {
        strategy: String,
        strategy_index: usize,
    },
    Exhausted(Vec<AttemptFailure>),
}

/// Tries the strategies for one (candidate, destination) pair in priority
/// order, verifying after each attempt and discarding invalid partial
/// results before the next strategy runs. Each strategy gets exactly one
/// attempt per candidate; the first verified success short-circuits.
pub struct StrategyChain {
    strategies: Vec<Arc<dyn Transport>>,
    backoff: Duration,
}

impl StrategyChain {
    pub fn new(strategies: Vec<Arc<dyn Transport>>) -> Self {
        Self {
            strategies,
            backoff: STRATEGY_BACKOFF,
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub async fn run(
        &self,
        artifact: &Artifact,
        candidate: &CandidateSource,
        dest: &Path,
    ) -> ChainOutcome {
        let mut failures = Vec::new();
        let total = self.strategies.len();

        for (index, strategy) in self.strategies.iter().enumerate() {
            if !strategy.supports(candidate) {
                debug!(
                    "Skipping strategy {} for '{}': candidate {} not applicable",
                    strategy.name(),
                    artifact.name,
                    candidate.describe()
                );
                continue;
            }

            debug!(
                "Attempt {}/{} for '{}' via {} ({})",
                index + 1,
                total,
                artifact.name,
                strategy.name(),
                candidate.describe()
            );

            match strategy.attempt(artifact, candidate, dest).await {
                Ok(()) => {
                    if verify(dest, artifact.min_size_bytes) {
                        debug!(
                            "'{}' downloaded and verified via {}",
                            artifact.name,
                            strategy.name()
                        );
                        return ChainOutcome::Success {
                            strategy: strategy.name().to_string(),
                            strategy_index: index,
                        };
                    }
                    warn!(
                        "'{}' downloaded via {} but failed verification, trying next strategy",
                        artifact.name,
                        strategy.name()
                    );
                    discard_partial(dest);
                    failures.push(AttemptFailure::Verification {
                        strategy: strategy.name().to_string(),
                        reason: format!(
                            "file missing or smaller than {} bytes",
                            artifact.min_size_bytes
                        ),
                    });
                }
                Err(e) => {
                    warn!(
                        "Strategy {} failed for '{}': {}",
                        strategy.name(),
                        artifact.name,
                        e
                    );
                    discard_partial(dest);
                    failures.push(AttemptFailure::Transport {
                        strategy: strategy.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }

            if index + 1 < total && !self.backoff.is_zero() {
                tokio::time::sleep(self.backoff).await;
            }
        }

        ChainOutcome::Exhausted(failures)
    }
}

/// Invariant: a failed or invalid attempt must not leave bytes at the
/// destination, so verification never observes stale output from a
/// previous strategy.
fn discard_partial(dest: &Path) {
    if dest.exists() {
        if let Err(e) = fs::remove_file(dest) {
            warn!("Could not remove partial file {}: {}", dest.display(), e);
        }
    }
}
