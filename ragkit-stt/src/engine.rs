use crate::codec::SttCodec;
use crate::transport::{self, SttReader, SttWriter};
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use ragkit_core::{RagKitError, TranscriptEvent};
use ragkit_provider::{SttEngine, TranscribeOptions};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

/// Bounds the reader's internal event channel, per spec.md §4.4.2 step 2.
/// A slow consumer blocks the reader here rather than growing memory
/// without limit.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// A streaming speech-to-text engine that dials one WebSocket session per
/// call and translates a provider's wire format through `C` (spec.md
/// §4.4.1/§4.4.2). Batch `transcribe` is implemented in terms of the
/// streaming path: it opens a session, feeds the whole buffer as one chunk,
/// and concatenates the final events it receives.
pub struct WebSocketSttEngine<C> {
    base_url: String,
    codec: Arc<C>,
}

impl<C: SttCodec + 'static> WebSocketSttEngine<C> {
    pub fn new(base_url: impl Into<String>, codec: C) -> Self {
        Self { base_url: base_url.into(), codec: Arc::new(codec) }
    }
}

#[async_trait]
impl<C: SttCodec + 'static> SttEngine for WebSocketSttEngine<C> {
    async fn transcribe(&self, audio: &[u8], options: &TranscribeOptions) -> Result<String, RagKitError> {
        let chunk = audio.to_vec();
        let audio_stream: BoxStream<'static, Result<Vec<u8>, RagKitError>> =
            futures_util::stream::once(async move { Ok(chunk) }).boxed();
        let cancel = CancellationToken::new();
        let mut events = self.transcribe_stream(audio_stream, options.clone(), cancel).await?;

        let mut text = String::new();
        while let Some(event) = events.next().await {
            let event = event?;
            if event.is_final && !event.text.is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(&event.text);
            }
        }
        Ok(text)
    }

    async fn transcribe_stream(
        &self,
        audio: BoxStream<'static, Result<Vec<u8>, RagKitError>>,
        options: TranscribeOptions,
        cancel: CancellationToken,
    ) -> Result<BoxStream<'static, Result<TranscriptEvent, RagKitError>>, RagKitError> {
        let url = self.codec.dial_url(&self.base_url, &options)?;
        let (reader, writer) = transport::dial(&url).await?;
        Ok(run_session(reader, writer, self.codec.clone(), audio, cancel))
    }
}

/// Cancels `token` when dropped, however the owning future ends — natural
/// exhaustion, an error, or the consumer simply dropping the stream. This is
/// the Rust-idiomatic stand-in for "the consumer's `yield` returned false"
/// (spec.md §4.4.2 step 4): there is no such return value here, so teardown
/// is tied to `Drop` instead of a boolean the generator checks itself.
struct CancelOnDrop(CancellationToken);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// Runs the dial/reader/writer/multiplexer/teardown pattern of spec.md
/// §4.4.2 over an already-connected `reader`/`writer` pair. Split out from
/// [`WebSocketSttEngine::transcribe_stream`] so the session logic can be
/// exercised against an in-memory transport in tests.
pub(crate) fn run_session<R, W, C>(
    mut reader: R,
    mut writer: W,
    codec: Arc<C>,
    mut audio: BoxStream<'static, Result<Vec<u8>, RagKitError>>,
    cancel: CancellationToken,
) -> BoxStream<'static, Result<TranscriptEvent, RagKitError>>
where
    R: SttReader + Send + 'static,
    W: SttWriter + Send + 'static,
    C: SttCodec + 'static,
{
    let (event_tx, event_rx) = mpsc::channel::<TranscriptEvent>(EVENT_CHANNEL_CAPACITY);
    let (error_tx, mut error_rx) = mpsc::channel::<RagKitError>(1);

    // Reader task: translates transport messages into transcript events
    // until the transport closes or the session is cancelled.
    let reader_cancel = cancel.clone();
    let reader_codec = codec.clone();
    let reader_errors = error_tx.clone();
    tokio::spawn(async move {
        loop {
            let message = tokio::select! {
                biased;
                _ = reader_cancel.cancelled() => break,
                message = reader.recv() => message,
            };
            match message {
                Ok(Some(raw)) => {
                    log::trace!("stt reader received a transport message");
                    match reader_codec.decode_message(raw) {
                        Ok(Some(event)) => {
                            if event_tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) => continue,
                        Err(err) => {
                            let _ = reader_errors.send(err).await;
                            break;
                        }
                    }
                }
                Ok(None) => {
                    log::debug!("stt reader observed the transport close");
                    break;
                }
                Err(err) => {
                    if !reader_cancel.is_cancelled() {
                        let _ = reader_errors.send(err).await;
                    }
                    break;
                }
            }
        }
    });

    // Writer task: drains the caller's audio sequence into the transport,
    // then sends the terminate sentinel and closes the transport, per
    // spec.md §4.4.2 steps 3 and 5.
    let writer_cancel = cancel.clone();
    let writer_codec = codec;
    tokio::spawn(async move {
        loop {
            let chunk = tokio::select! {
                biased;
                _ = writer_cancel.cancelled() => break,
                chunk = audio.next() => chunk,
            };
            match chunk {
                Some(Ok(bytes)) => {
                    log::trace!("stt writer sending an audio chunk ({} bytes)", bytes.len());
                    if writer.send(writer_codec.encode_audio(bytes)).await.is_err() {
                        break;
                    }
                }
                Some(Err(err)) => {
                    let _ = error_tx.send(err).await;
                    break;
                }
                None => {
                    log::debug!("stt writer reached the end of the audio source");
                    if let Some(terminate) = writer_codec.terminate_message() {
                        let _ = writer.send(terminate).await;
                    }
                    break;
                }
            }
        }
        let _ = writer.close().await;
    });

    let mut events = ReceiverStream::new(event_rx);
    async_stream::stream! {
        let _guard = CancelOnDrop(cancel.clone());
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    yield Err(RagKitError::Cancelled);
                    break;
                }
                error = error_rx.recv() => {
                    if let Some(err) = error {
                        log::warn!("stt session forwarding a stream error: {err}");
                        yield Err(err);
                    }
                    break;
                }
                event = events.next() => {
                    match event {
                        Some(event) => yield Ok(event),
                        None => break,
                    }
                }
            }
        }
    }
    .boxed()
}
