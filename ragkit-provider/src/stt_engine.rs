use async_trait::async_trait;
use futures_util::stream::BoxStream;
use ragkit_core::{RagKitError, TranscriptEvent};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// Call options shared by batch and streaming transcription (spec.md
/// §4.4.1/§4.4.2). Every field is optional; engines fall back to their
/// provider's default when unset.
#[derive(Debug, Clone, Default)]
pub struct TranscribeOptions {
    pub language: Option<String>,
    pub model: Option<String>,
    pub punctuate: Option<bool>,
    pub diarize: Option<bool>,
    pub sample_rate_hz: Option<u32>,
    pub encoding: Option<String>,
    /// Provider-specific options the common fields above don't cover.
    pub extra: HashMap<String, serde_json::Value>,
}

impl TranscribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_sample_rate_hz(mut self, hz: u32) -> Self {
        self.sample_rate_hz = Some(hz);
        self
    }
}

/// A speech-to-text provider, in both its batch and streaming shapes
/// (spec.md §4.4.1/§4.4.2).
#[async_trait]
pub trait SttEngine: Send + Sync {
    /// Transcribes a complete, already-recorded audio buffer and returns its
    /// full text. Providers that are natively asynchronous (submit-then-poll)
    /// implement this by polling to completion internally.
    async fn transcribe(
        &self,
        audio: &[u8],
        options: &TranscribeOptions,
    ) -> Result<String, RagKitError>;

    /// Streams transcript events for an incoming audio stream.
    ///
    /// `audio` yields raw audio chunks as they become available; the
    /// returned stream yields [`TranscriptEvent`]s as the engine produces
    /// them, and ends (without an error) once `cancel` is triggered and the
    /// engine has flushed whatever it can, per spec.md §4.4.2's shutdown
    /// ordering.
    async fn transcribe_stream(
        &self,
        audio: BoxStream<'static, Result<Vec<u8>, RagKitError>>,
        options: TranscribeOptions,
        cancel: CancellationToken,
    ) -> Result<BoxStream<'static, Result<TranscriptEvent, RagKitError>>, RagKitError>;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
