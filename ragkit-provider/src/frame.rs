use crate::stt_engine::{SttEngine, TranscribeOptions};
use ragkit_core::RagKitError;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// What kind of payload a [`Frame`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Audio,
    Text,
    Control,
}

/// The unit exchanged across the STT frame pipeline (spec.md §4.4.3): an
/// audio buffer to transcribe, a text result, or an out-of-band control
/// signal (e.g. "end of turn").
#[derive(Debug, Clone)]
pub struct Frame {
    pub kind: FrameKind,
    pub audio: Option<Vec<u8>>,
    pub text: Option<String>,
}

impl Frame {
    pub fn audio(bytes: Vec<u8>) -> Self {
        Self {
            kind: FrameKind::Audio,
            audio: Some(bytes),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: FrameKind::Text,
            audio: None,
            text: Some(text.into()),
        }
    }

    pub fn control() -> Self {
        Self {
            kind: FrameKind::Control,
            audio: None,
            text: None,
        }
    }
}

/// Adapts a batch [`SttEngine`] into a frame-at-a-time processor: each
/// incoming [`Frame::audio`] frame is transcribed and forwarded downstream
/// as a [`Frame::text`] frame; every other frame kind passes through
/// untouched, per spec.md §4.4.3.
pub struct FrameProcessor<E> {
    engine: Arc<E>,
    options: TranscribeOptions,
}

impl<E: SttEngine> FrameProcessor<E> {
    pub fn new(engine: Arc<E>, options: TranscribeOptions) -> Self {
        Self { engine, options }
    }

    /// Drains `input` until it closes or `cancel` fires, forwarding
    /// transcribed frames to `output`. Context cancellation returns
    /// `Err(RagKitError::Cancelled)`; `input` closing is the ordinary
    /// shutdown path and returns `Ok(())`, per spec.md §4.4.3. A send
    /// failure on `output` (the receiver was dropped) also ends the loop
    /// without an error, matching that same "reader went away" path.
    pub async fn process(
        &self,
        mut input: mpsc::Receiver<Frame>,
        output: mpsc::Sender<Frame>,
        cancel: CancellationToken,
    ) -> Result<(), RagKitError> {
        loop {
            let frame = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(RagKitError::Cancelled),
                frame = input.recv() => frame,
            };
            let Some(frame) = frame else { break };

            let out = match frame.kind {
                FrameKind::Audio => {
                    let audio = frame.audio.as_deref().unwrap_or(&[]);
                    let text = self
                        .engine
                        .transcribe(audio, &self.options)
                        .await
                        .map_err(|source| RagKitError::decode("stt: transcribe", source.to_string()))?;
                    Frame::text(text)
                }
                FrameKind::Text | FrameKind::Control => frame,
            };

            if output.send(out).await.is_err() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stt_engine::TranscribeOptions;
    use async_trait::async_trait;
    use futures_util::stream::BoxStream;
    use ragkit_core::TranscriptEvent;

    struct EchoEngine;

    #[async_trait]
    impl SttEngine for EchoEngine {
        async fn transcribe(
            &self,
            audio: &[u8],
            _options: &TranscribeOptions,
        ) -> Result<String, RagKitError> {
            Ok(String::from_utf8_lossy(audio).to_uppercase())
        }

        async fn transcribe_stream(
            &self,
            _audio: BoxStream<'static, Result<Vec<u8>, RagKitError>>,
            _options: TranscribeOptions,
            _cancel: CancellationToken,
        ) -> Result<BoxStream<'static, Result<TranscriptEvent, RagKitError>>, RagKitError> {
            unimplemented!("not exercised by frame processor tests")
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl SttEngine for FailingEngine {
        async fn transcribe(
            &self,
            _audio: &[u8],
            _options: &TranscribeOptions,
        ) -> Result<String, RagKitError> {
            Err(RagKitError::remote_processing("test", "provider rejected audio"))
        }

        async fn transcribe_stream(
            &self,
            _audio: BoxStream<'static, Result<Vec<u8>, RagKitError>>,
            _options: TranscribeOptions,
            _cancel: CancellationToken,
        ) -> Result<BoxStream<'static, Result<TranscriptEvent, RagKitError>>, RagKitError> {
            unimplemented!("not exercised by frame processor tests")
        }
    }

    #[tokio::test]
    async fn audio_frames_become_text_frames() {
        let processor = FrameProcessor::new(Arc::new(EchoEngine), TranscribeOptions::new());
        let (in_tx, in_rx) = mpsc::channel(4);
        let (out_tx, mut out_rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();

        in_tx.send(Frame::audio(b"hi".to_vec())).await.unwrap();
        in_tx.send(Frame::control()).await.unwrap();
        drop(in_tx);

        processor.process(in_rx, out_tx, cancel).await.unwrap();

        let first = out_rx.recv().await.unwrap();
        assert_eq!(first.kind, FrameKind::Text);
        assert_eq!(first.text.as_deref(), Some("HI"));

        let second = out_rx.recv().await.unwrap();
        assert_eq!(second.kind, FrameKind::Control);
    }

    #[tokio::test]
    async fn cancellation_returns_the_cancelled_error() {
        let processor = FrameProcessor::new(Arc::new(EchoEngine), TranscribeOptions::new());
        let (_in_tx, in_rx) = mpsc::channel(4);
        let (out_tx, _out_rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = processor.process(in_rx, out_tx, cancel).await.unwrap_err();
        assert!(matches!(err, RagKitError::Cancelled));
    }

    #[tokio::test]
    async fn input_closing_without_cancellation_returns_ok() {
        let processor = FrameProcessor::new(Arc::new(EchoEngine), TranscribeOptions::new());
        let (in_tx, in_rx) = mpsc::channel(4);
        let (out_tx, _out_rx) = mpsc::channel(4);
        drop(in_tx);

        processor.process(in_rx, out_tx, CancellationToken::new()).await.unwrap();
    }

    #[tokio::test]
    async fn transcribe_failure_aborts_with_the_stt_transcribe_tag() {
        let processor = FrameProcessor::new(Arc::new(FailingEngine), TranscribeOptions::new());
        let (in_tx, in_rx) = mpsc::channel(4);
        let (out_tx, _out_rx) = mpsc::channel(4);

        in_tx.send(Frame::audio(b"hi".to_vec())).await.unwrap();
        drop(in_tx);

        let err = processor
            .process(in_rx, out_tx, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("stt: transcribe"));
    }
}
