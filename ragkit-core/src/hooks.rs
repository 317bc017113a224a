use crate::error::RagKitError;
use crate::transcript_event::TranscriptEvent;

/// A single set of streaming STT callbacks (spec.md §4.4.4).
///
/// All three callbacks are optional; a hook that only cares about final
/// utterances implements `on_utterance` and leaves the others at their
/// default no-op.
pub trait SttHook: Send + Sync {
    /// Called for every event, interim or final.
    fn on_transcript(&self, _event: &TranscriptEvent) {}

    /// Called once per final event, with just the committed text.
    fn on_utterance(&self, _text: &str) {}

    /// Called when the stream yields an error. Returning `Some` replaces the
    /// error the caller ultimately observes; returning `None` leaves it
    /// unchanged (other hooks still run either way).
    fn on_error(&self, _err: &RagKitError) -> Option<RagKitError> {
        None
    }
}

/// An ordered composition of [`SttHook`]s, following the fan-out semantics
/// of spec.md §4.4.4:
///
/// - `on_transcript`/`on_utterance` run on every hook in order.
/// - `on_error` hooks run in order; the first to return `Some` short-circuits
///   and its value becomes the composed error, otherwise the original error
///   is returned unchanged.
#[derive(Default)]
pub struct SttHooks {
    hooks: Vec<Box<dyn SttHook>>,
}

impl SttHooks {
    /// An empty hook set.
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Builds a composed hook set from an ordered list of hooks.
    pub fn compose(hooks: Vec<Box<dyn SttHook>>) -> Self {
        Self { hooks }
    }

    /// Appends a hook, returning `self` for chaining.
    #[must_use]
    pub fn with_hook(mut self, hook: Box<dyn SttHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Dispatches `on_transcript` to every hook, in order.
    pub fn dispatch_transcript(&self, event: &TranscriptEvent) {
        for hook in &self.hooks {
            hook.on_transcript(event);
        }
        if event.is_final {
            for hook in &self.hooks {
                hook.on_utterance(&event.text);
            }
        }
    }

    /// Dispatches `on_error` to every hook in order, returning the first
    /// non-`None` replacement or `err` unchanged.
    pub fn dispatch_error(&self, err: RagKitError) -> RagKitError {
        for hook in &self.hooks {
            if let Some(replacement) = hook.on_error(&err) {
                return replacement;
            }
        }
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHook {
        transcripts: Arc<AtomicUsize>,
        utterances: Arc<AtomicUsize>,
    }

    impl SttHook for CountingHook {
        fn on_transcript(&self, _event: &TranscriptEvent) {
            self.transcripts.fetch_add(1, Ordering::SeqCst);
        }
        fn on_utterance(&self, _text: &str) {
            self.utterances.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn dispatch_transcript_only_fires_utterance_on_final() {
        let transcripts = Arc::new(AtomicUsize::new(0));
        let utterances = Arc::new(AtomicUsize::new(0));
        let hooks = SttHooks::new().with_hook(Box::new(CountingHook {
            transcripts: transcripts.clone(),
            utterances: utterances.clone(),
        }));

        hooks.dispatch_transcript(&TranscriptEvent::new("hel", false, 0.0));
        hooks.dispatch_transcript(&TranscriptEvent::new("hello", true, 0.0));

        assert_eq!(transcripts.load(Ordering::SeqCst), 2);
        assert_eq!(utterances.load(Ordering::SeqCst), 1);
    }

    struct ReplacingHook;
    impl SttHook for ReplacingHook {
        fn on_error(&self, _err: &RagKitError) -> Option<RagKitError> {
            Some(RagKitError::Cancelled)
        }
    }

    struct NoopHook;
    impl SttHook for NoopHook {}

    #[test]
    fn dispatch_error_short_circuits_on_first_replacement() {
        let hooks = SttHooks::new()
            .with_hook(Box::new(NoopHook))
            .with_hook(Box::new(ReplacingHook));
        let result = hooks.dispatch_error(RagKitError::load("s", "bad"));
        assert!(matches!(result, RagKitError::Cancelled));
    }

    #[test]
    fn dispatch_error_passes_through_when_no_hook_replaces() {
        let hooks = SttHooks::new().with_hook(Box::new(NoopHook));
        let result = hooks.dispatch_error(RagKitError::load("s", "bad"));
        assert!(matches!(result, RagKitError::Load { .. }));
    }
}
