//! Bounded-latency wrapper around the blocking matcher.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, bounded};

use electoral_ingest::ReferenceSource;
use electoral_model::{CandidateRecord, MatchVerdict};

use crate::matcher::ReferenceMatcher;

/// Runs [`ReferenceMatcher::check`] on a worker thread and waits at most
/// `timeout` for the verdict.
///
/// When the deadline passes the roll is reported unavailable; the worker is
/// left to finish on its own and its verdict is discarded.
pub fn check_with_timeout<S>(
    matcher: &Arc<ReferenceMatcher<S>>,
    candidate: &CandidateRecord,
    timeout: Duration,
) -> MatchVerdict
where
    S: ReferenceSource + 'static,
{
    let (tx, rx) = bounded(1);
    let worker_matcher = Arc::clone(matcher);
    let worker_candidate = candidate.clone();
    let span = tracing::Span::current();

    let spawned = thread::Builder::new()
        .name("reference-check".to_string())
        .spawn(move || {
            let _guard = span.enter();
            // The receiver is gone once the caller timed out.
            let _ = tx.send(worker_matcher.check(&worker_candidate));
        });
    if let Err(err) = spawned {
        tracing::error!(error = %err, "failed to start reference check worker");
        return MatchVerdict::source_unavailable(format!("cannot start reference check: {err}"));
    }

    match rx.recv_timeout(timeout) {
        Ok(verdict) => verdict,
        Err(RecvTimeoutError::Timeout) => {
            tracing::error!(timeout_ms = timeout.as_millis(), "reference check timed out");
            MatchVerdict::source_unavailable(format!(
                "reference scan timed out after {} ms",
                timeout.as_millis()
            ))
        }
        Err(RecvTimeoutError::Disconnected) => {
            tracing::error!("reference check worker stopped without a verdict");
            MatchVerdict::source_unavailable("reference check worker stopped without a verdict")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use electoral_ingest::{ReferenceDataset, SourceEncoding};

    use super::*;

    struct SlowSource(Duration);

    impl ReferenceSource for SlowSource {
        fn load(&self) -> electoral_ingest::Result<Arc<ReferenceDataset>> {
            thread::sleep(self.0);
            ReferenceDataset::from_text(
                "slow.csv",
                "Nom/Nom de Jeune Fille;Prenoms\nABA;MICHEL\n".to_string(),
                SourceEncoding::Utf8,
            )
            .map(Arc::new)
        }

        fn describe(&self) -> String {
            "slow".to_string()
        }
    }

    struct PanickingSource;

    impl ReferenceSource for PanickingSource {
        fn load(&self) -> electoral_ingest::Result<Arc<ReferenceDataset>> {
            panic!("source exploded");
        }

        fn describe(&self) -> String {
            "panicking".to_string()
        }
    }

    #[test]
    fn test_fast_check_returns_verdict() {
        let matcher = Arc::new(ReferenceMatcher::new(SlowSource(Duration::ZERO)));
        let verdict = check_with_timeout(
            &matcher,
            &CandidateRecord::new("ABA", "MICHEL"),
            Duration::from_secs(10),
        );
        assert!(verdict.is_found());
    }

    #[test]
    fn test_slow_check_times_out() {
        let matcher = Arc::new(ReferenceMatcher::new(SlowSource(Duration::from_secs(2))));
        let verdict = check_with_timeout(
            &matcher,
            &CandidateRecord::new("ABA", "MICHEL"),
            Duration::from_millis(50),
        );
        assert!(!verdict.is_determined());
        assert!(matches!(
            verdict,
            MatchVerdict::SourceUnavailable { ref reason } if reason.contains("timed out")
        ));
    }

    #[test]
    fn test_worker_panic_is_unavailable() {
        let matcher = Arc::new(ReferenceMatcher::new(PanickingSource));
        let verdict = check_with_timeout(
            &matcher,
            &CandidateRecord::new("ABA", "MICHEL"),
            Duration::from_secs(10),
        );
        assert!(!verdict.is_determined());
    }
}
