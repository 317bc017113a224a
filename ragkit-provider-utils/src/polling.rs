use async_trait::async_trait;
use ragkit_core::RagKitError;
use std::time::Duration;

/// Default cadence for [`poll_until_done`] when a provider's [`ProviderConfig`]
/// doesn't specify one. A QoS knob, not wired to any correctness invariant —
/// widening it only makes status checks less frequent.
///
/// [`ProviderConfig`]: ragkit_core::ProviderConfig
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Outcome of a single poll of an asynchronous, submit-then-poll job (a
/// document-AI or batch transcription request).
pub enum PollOutcome<T> {
    /// The job is still running; keep polling.
    Pending,
    /// The job finished successfully.
    Done(T),
    /// The job finished with a provider-reported failure.
    Failed(String),
}

/// A job whose status is checked by repeated, independent polls — the shape
/// shared by AssemblyAI's `wait_for_completion` and every document-AI
/// provider's job-status endpoint.
#[async_trait]
pub trait PollingTranscriber {
    type Output;

    /// Performs one status check.
    async fn poll(&self) -> Result<PollOutcome<Self::Output>, RagKitError>;
}

/// Polls `job` on `interval` until it reports [`PollOutcome::Done`] or
/// [`PollOutcome::Failed`].
///
/// Grounded on `AssemblyAITranscriptionModel::wait_for_completion`'s
/// queued/processing/completed/error loop, generalized so every
/// submit-then-poll provider shares one implementation instead of
/// reimplementing the sleep loop.
pub async fn poll_until_done<P>(job: &P, interval: Duration) -> Result<P::Output, RagKitError>
where
    P: PollingTranscriber + Send + Sync,
{
    loop {
        match job.poll().await? {
            PollOutcome::Done(output) => return Ok(output),
            PollOutcome::Failed(message) => {
                log::warn!("polling job reported a processing failure: {message}");
                return Err(RagKitError::remote_processing("polling", message));
            }
            PollOutcome::Pending => {
                log::trace!("polling job still pending, sleeping {interval:?}");
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingJob {
        calls: Arc<AtomicUsize>,
        done_after: usize,
    }

    #[async_trait]
    impl PollingTranscriber for CountingJob {
        type Output = String;

        async fn poll(&self) -> Result<PollOutcome<String>, RagKitError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= self.done_after {
                Ok(PollOutcome::Done("finished".to_string()))
            } else {
                Ok(PollOutcome::Pending)
            }
        }
    }

    struct FailingJob;

    #[async_trait]
    impl PollingTranscriber for FailingJob {
        type Output = String;

        async fn poll(&self) -> Result<PollOutcome<String>, RagKitError> {
            Ok(PollOutcome::Failed("boom".to_string()))
        }
    }

    #[tokio::test]
    async fn polls_until_done() {
        let calls = Arc::new(AtomicUsize::new(0));
        let job = CountingJob { calls: calls.clone(), done_after: 3 };
        let result = poll_until_done(&job, Duration::from_millis(1)).await.unwrap();
        assert_eq!(result, "finished");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn failed_outcome_becomes_remote_processing_error() {
        let err = poll_until_done(&FailingJob, Duration::from_millis(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RagKitError::RemoteProcessing { .. }));
    }
}
