// Acquisition pipeline behavior: chain ordering, cleanup, idempotence and
// batch summaries, exercised with scripted in-memory transports.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use srf_common::error::{Result, SrfError};
use srf_common::model::{Artifact, CandidateSource, DEFAULT_MIN_SIZE_BYTES};
use srf_common::report::{AcquisitionStatus, AttemptFailure};
use srf_core::chain::{ChainOutcome, StrategyChain};
use srf_core::orchestrator::Orchestrator;
use srf_core::resolver::Resolver;
use srf_net::transport::Transport;

type Behavior = Box<dyn Fn(usize, &Artifact, &Path) -> Result<()> + Send + Sync>;

struct ScriptedTransport {
    name: &'static str,
    calls: AtomicUsize,
    behavior: Behavior,
}

impl ScriptedTransport {
    fn new(name: &'static str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name,
            calls: AtomicUsize::new(0),
            behavior,
        })
    }

    fn failing(name: &'static str) -> Arc<Self> {
        Self::new(
            name,
            Box::new(|_, _, _| Err(SrfError::Generic("connection reset".to_string()))),
        )
    }

    fn writing(name: &'static str, bytes: usize) -> Arc<Self> {
        Self::new(
            name,
            Box::new(move |_, _, dest| {
                std::fs::write(dest, vec![0u8; bytes])?;
                Ok(())
            }),
        )
    }

    /// Fails the first `failures` calls, then writes a file of `bytes`.
    fn flaky(name: &'static str, failures: usize, bytes: usize) -> Arc<Self> {
        Self::new(
            name,
            Box::new(move |call, _, dest| {
                if call < failures {
                    Err(SrfError::Generic("host unavailable".to_string()))
                } else {
                    std::fs::write(dest, vec![0u8; bytes])?;
                    Ok(())
                }
            }),
        )
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn attempt(
        &self,
        artifact: &Artifact,
        _candidate: &CandidateSource,
        dest: &Path,
    ) -> Result<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        (self.behavior)(call, artifact, dest)
    }
}

fn artifact(name: &str, min_size_bytes: u64, candidate_count: usize) -> Artifact {
    Artifact {
        name: name.to_string(),
        min_size_bytes,
        candidates: (0..candidate_count)
            .map(|i| CandidateSource::FileId(format!("{name}-id-{i}")))
            .collect(),
        mirrors: vec![],
        manual_source: Some(format!("https://example.com/{name}")),
    }
}

fn strategies(transports: &[Arc<ScriptedTransport>]) -> Vec<Arc<dyn Transport>> {
    transports
        .iter()
        .map(|t| Arc::clone(t) as Arc<dyn Transport>)
        .collect()
}

#[tokio::test]
async fn failed_transport_leaves_no_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("foo.bin");
    // Writes half a file, then reports failure.
    let torn = ScriptedTransport::new(
        "torn",
        Box::new(|_, _, dest| {
            std::fs::write(dest, vec![0u8; 512])?;
            Err(SrfError::Generic("connection reset mid-stream".to_string()))
        }),
    );
    let art = artifact("foo.bin", 1024, 1);
    let chain = StrategyChain::new(strategies(&[torn])).with_backoff(Duration::ZERO);

    let outcome = chain.run(&art, &art.candidates[0], &dest).await;

    assert!(!dest.exists(), "partial output must be discarded");
    match outcome {
        ChainOutcome::Exhausted(failures) => {
            assert_eq!(failures.len(), 1);
            assert!(matches!(failures[0], AttemptFailure::Transport { .. }));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[tokio::test]
async fn undersized_download_is_rejected_and_removed() {
    // Scenario A: one strategy writes 1 KiB against a 10 MiB threshold.
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("foo.bin");
    let tiny = ScriptedTransport::writing("tiny", 1024);
    let art = artifact("foo.bin", DEFAULT_MIN_SIZE_BYTES, 1);
    let chain = StrategyChain::new(strategies(&[tiny])).with_backoff(Duration::ZERO);

    let outcome = chain.run(&art, &art.candidates[0], &dest).await;

    assert!(!dest.exists(), "invalid file must be deleted");
    match outcome {
        ChainOutcome::Exhausted(failures) => {
            assert_eq!(failures.len(), 1);
            assert!(matches!(failures[0], AttemptFailure::Verification { .. }));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[tokio::test]
async fn verified_success_short_circuits_later_strategies() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("foo.bin");
    let first = ScriptedTransport::writing("first", 4096);
    let second = ScriptedTransport::writing("second", 4096);
    let art = artifact("foo.bin", 1024, 1);
    let chain =
        StrategyChain::new(strategies(&[first.clone(), second.clone()])).with_backoff(Duration::ZERO);

    let outcome = chain.run(&art, &art.candidates[0], &dest).await;

    match outcome {
        ChainOutcome::Success {
            strategy,
            strategy_index,
        } => {
            assert_eq!(strategy, "first");
            assert_eq!(strategy_index, 0);
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(first.calls(), 1);
    assert_eq!(second.calls(), 0, "no strategy after the winner may run");
    assert!(dest.exists());
}

#[tokio::test]
async fn second_strategy_recovers_after_transport_failure() {
    // Scenario B: first strategy fails transport, second delivers a valid
    // file; the report names the second strategy.
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("foo.bin");
    let flaky = ScriptedTransport::failing("flaky");
    let solid = ScriptedTransport::writing("solid", 8192);
    let art = artifact("foo.bin", 4096, 1);
    let chain =
        StrategyChain::new(strategies(&[flaky.clone(), solid.clone()])).with_backoff(Duration::ZERO);

    let outcome = chain.run(&art, &art.candidates[0], &dest).await;

    match outcome {
        ChainOutcome::Success {
            strategy,
            strategy_index,
        } => {
            assert_eq!(strategy, "solid");
            assert_eq!(strategy_index, 1);
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(flaky.calls(), 1);
    assert_eq!(solid.calls(), 1);
}

#[tokio::test]
async fn already_present_file_triggers_no_transport() {
    let dir = tempfile::tempdir().unwrap();
    let art = artifact("foo.bin", 1024, 2);
    std::fs::write(dir.path().join("foo.bin"), vec![0u8; 2048]).unwrap();
    let transport = ScriptedTransport::writing("unused", 2048);
    let resolver =
        Resolver::new(strategies(&[transport.clone()])).with_backoff(Duration::ZERO);

    let report = resolver.resolve(&art, dir.path()).await;

    assert_eq!(report.status, AcquisitionStatus::AlreadyPresent);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn resolver_walks_candidates_until_one_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let art = artifact("foo.bin", 1024, 3);
    // One strategy in the chain, so each candidate costs one call: the
    // first candidate fails, the second delivers.
    let transport = ScriptedTransport::flaky("recovering", 1, 2048);
    let resolver =
        Resolver::new(strategies(&[transport.clone()])).with_backoff(Duration::ZERO);

    let report = resolver.resolve(&art, dir.path()).await;

    match report.status {
        AcquisitionStatus::Acquired {
            strategy_index,
            candidate_index,
            ..
        } => {
            assert_eq!(strategy_index, 0);
            assert_eq!(candidate_index, 1);
        }
        other => panic!("expected acquired, got {other:?}"),
    }
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn exhausting_every_candidate_reports_failed() {
    let dir = tempfile::tempdir().unwrap();
    let art = artifact("foo.bin", 1024, 3);
    let transport = ScriptedTransport::failing("down");
    let resolver =
        Resolver::new(strategies(&[transport.clone()])).with_backoff(Duration::ZERO);

    let report = resolver.resolve(&art, dir.path()).await;

    assert_eq!(report.status, AcquisitionStatus::Failed);
    assert_eq!(transport.calls(), 3, "one attempt per candidate");
    assert!(!dir.path().join("foo.bin").exists());
}

#[tokio::test]
async fn batch_summary_counts_partial_failure() {
    // Scenario C: three artifacts, one exhausts all its candidates.
    let dir = tempfile::tempdir().unwrap();
    let artifacts = vec![
        artifact("a.pth", 1024, 1),
        artifact("b.pth", 1024, 1),
        artifact("c.pth", 1024, 2),
    ];
    let transport = ScriptedTransport::new(
        "selective",
        Box::new(|_, artifact, dest| {
            if artifact.name == "c.pth" {
                Err(SrfError::Generic("gone".to_string()))
            } else {
                std::fs::write(dest, vec![0u8; 2048])?;
                Ok(())
            }
        }),
    );
    let resolver =
        Resolver::new(strategies(&[transport.clone()])).with_backoff(Duration::ZERO);
    let orchestrator = Orchestrator::new(resolver, dir.path().to_path_buf());

    let summary = orchestrator.run_batch(&artifacts).await.unwrap();

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.succeeded(), 2);
    assert!(!summary.all_succeeded());
    let failed: Vec<_> = summary.failures().map(|r| r.name.as_str()).collect();
    assert_eq!(failed, vec!["c.pth"]);
}

#[tokio::test]
async fn rerunning_the_batch_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = vec![artifact("a.pth", 1024, 1), artifact("b.pth", 1024, 1)];
    let transport = ScriptedTransport::writing("writer", 2048);
    let resolver =
        Resolver::new(strategies(&[transport.clone()])).with_backoff(Duration::ZERO);
    let orchestrator = Orchestrator::new(resolver, dir.path().to_path_buf());

    let first = orchestrator.run_batch(&artifacts).await.unwrap();
    assert!(first.all_succeeded());
    let calls_after_first = transport.calls();

    let second = orchestrator.run_batch(&artifacts).await.unwrap();
    assert!(second.all_succeeded());
    assert!(second
        .reports()
        .iter()
        .all(|r| r.status == AcquisitionStatus::AlreadyPresent));
    assert_eq!(
        transport.calls(),
        calls_after_first,
        "second run must not touch the network"
    );
}
