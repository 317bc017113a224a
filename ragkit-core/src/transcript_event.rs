use serde::{Deserialize, Serialize};

/// Per-word timing emitted alongside a [`TranscriptEvent`] when the provider
/// supports word-level timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// The recognised word text.
    pub text: String,
    /// Start offset, in seconds, within the audio stream.
    pub start: f64,
    /// End offset, in seconds. Always `>= start`.
    pub end: f64,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f64,
}

impl Word {
    /// Creates a new word timing.
    pub fn new(text: impl Into<String>, start: f64, end: f64, confidence: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            confidence,
        }
    }
}

/// A unit of streaming speech-to-text output.
///
/// # Invariants
///
/// - For a single streaming session, the non-decreasing sequence of
///   `timestamp`s across **final** events covers the recognised audio;
///   interim events between two finals revise the same region.
/// - An event with empty `text` is never emitted — callers constructing one
///   should use [`TranscriptEvent::non_empty`] to enforce this at the
///   boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEvent {
    /// Current transcript text; may be a growing prefix across consecutive
    /// non-final events for the same region.
    pub text: String,
    /// `true` iff this event will not be revised.
    pub is_final: bool,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    /// Audio-domain offset, in seconds, at which this event begins.
    pub timestamp: f64,
    /// Detected or configured language tag (e.g. `"en"`).
    pub language: Option<String>,
    /// Optional per-word timings.
    pub words: Option<Vec<Word>>,
}

impl TranscriptEvent {
    /// Creates a new event.
    pub fn new(text: impl Into<String>, is_final: bool, timestamp: f64) -> Self {
        Self {
            text: text.into(),
            is_final,
            confidence: 1.0,
            timestamp,
            language: None,
            words: None,
        }
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = Some(words);
        self
    }

    /// Returns `Some(self)` unless `text` is empty, per invariant 6 of the
    /// data model: an event with empty text is not emitted.
    #[must_use]
    pub fn non_empty(self) -> Option<Self> {
        if self.text.is_empty() { None } else { Some(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_drops_empty_text() {
        assert!(TranscriptEvent::new("", false, 0.0).non_empty().is_none());
        assert!(TranscriptEvent::new("hi", false, 0.0).non_empty().is_some());
    }

    #[test]
    fn builder_methods_chain() {
        let event = TranscriptEvent::new("hello world", true, 1.5)
            .with_confidence(0.9)
            .with_language("en")
            .with_words(vec![Word::new("hello", 1.5, 1.8, 0.95)]);
        assert_eq!(event.confidence, 0.9);
        assert_eq!(event.language.as_deref(), Some("en"));
        assert_eq!(event.words.unwrap().len(), 1);
    }
}
