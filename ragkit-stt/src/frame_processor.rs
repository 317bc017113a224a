use crate::codec::SttCodec;
use crate::engine::WebSocketSttEngine;
use ragkit_provider::FrameProcessor;

/// A [`FrameProcessor`] wired to a [`WebSocketSttEngine`] — the concrete
/// shape `as_frame_processor` takes for streaming STT providers (spec.md
/// §4.4.3). The adapter logic itself lives in `ragkit_provider::frame`,
/// since it doesn't depend on anything WebSocket-specific; this alias just
/// names the common instantiation.
pub type WebSocketFrameProcessor<C> = FrameProcessor<WebSocketSttEngine<C>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::JsonEventCodec;
    use ragkit_provider::{Frame, FrameKind, TranscribeOptions};
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn control_frames_pass_through_untouched() {
        let engine = Arc::new(WebSocketSttEngine::new("wss://example.test/stream", JsonEventCodec));
        let processor: WebSocketFrameProcessor<JsonEventCodec> = FrameProcessor::new(engine, TranscribeOptions::new());

        let (in_tx, in_rx) = mpsc::channel(4);
        let (out_tx, mut out_rx) = mpsc::channel(4);
        in_tx.send(Frame::control()).await.unwrap();
        drop(in_tx);

        processor.process(in_rx, out_tx, CancellationToken::new()).await.unwrap();

        let frame = out_rx.recv().await.unwrap();
        assert_eq!(frame.kind, FrameKind::Control);
    }
}
