use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use ragkit_core::RagKitError;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A transport-level message, independent of any particular WebSocket
/// library type. Codecs speak this, not [`tokio_tungstenite::tungstenite::Message`]
/// directly, so [`crate::codec::SttCodec`] implementations stay testable
/// without a live socket.
#[derive(Debug, Clone, PartialEq)]
pub enum WireMessage {
    Text(String),
    Binary(Vec<u8>),
}

/// The reader half of a streaming STT session (spec.md §4.4.2 step 2).
#[async_trait]
pub trait SttReader: Send {
    /// Returns the next inbound message, or `Ok(None)` once the transport is
    /// closed.
    async fn recv(&mut self) -> Result<Option<WireMessage>, RagKitError>;
}

/// The writer half of a streaming STT session (spec.md §4.4.2 step 3).
#[async_trait]
pub trait SttWriter: Send {
    async fn send(&mut self, message: WireMessage) -> Result<(), RagKitError>;

    /// Closes the transport with a normal closure (spec.md §4.4.2 step 5).
    async fn close(&mut self) -> Result<(), RagKitError>;
}

pub struct WsReader(SplitStream<WsStream>);
pub struct WsWriter(SplitSink<WsStream, Message>);

/// Dials `url` and splits the connection into independent halves so the
/// reader and writer tasks can run concurrently without sharing a lock.
pub async fn dial(url: &str) -> Result<(WsReader, WsWriter), RagKitError> {
    let (stream, _response) = tokio_tungstenite::connect_async(url)
        .await
        .map_err(|e| RagKitError::transport(url, None, e.to_string()))?;
    let (sink, source) = stream.split();
    Ok((WsReader(source), WsWriter(sink)))
}

#[async_trait]
impl SttReader for WsReader {
    async fn recv(&mut self) -> Result<Option<WireMessage>, RagKitError> {
        loop {
            return match self.0.next().await {
                None => Ok(None),
                Some(Ok(Message::Text(text))) => Ok(Some(WireMessage::Text(text.to_string()))),
                Some(Ok(Message::Binary(bytes))) => Ok(Some(WireMessage::Binary(bytes.to_vec()))),
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
                Some(Ok(Message::Close(_))) => Ok(None),
                Some(Err(e)) => Err(RagKitError::transport("websocket", None, e.to_string())),
            };
        }
    }
}

#[async_trait]
impl SttWriter for WsWriter {
    async fn send(&mut self, message: WireMessage) -> Result<(), RagKitError> {
        let message = match message {
            WireMessage::Text(text) => Message::Text(text.into()),
            WireMessage::Binary(bytes) => Message::Binary(bytes.into()),
        };
        self.0
            .send(message)
            .await
            .map_err(|e| RagKitError::transport("websocket", None, e.to_string()))
    }

    async fn close(&mut self) -> Result<(), RagKitError> {
        self.0
            .close()
            .await
            .map_err(|e| RagKitError::transport("websocket", None, e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    /// Stands in for the provider's side of the connection: `inbound` feeds
    /// what `recv()` returns, as if the provider had sent it.
    pub struct ChannelReader {
        pub inbound: mpsc::Receiver<WireMessage>,
    }

    /// The other half: every `send()` is observable on `outbound`, and
    /// `closed` flips once `close()` runs.
    pub struct ChannelWriter {
        pub outbound: mpsc::Sender<WireMessage>,
        pub closed: Arc<AtomicBool>,
    }

    pub fn channel_pair() -> (ChannelReader, mpsc::Sender<WireMessage>, ChannelWriter, mpsc::Receiver<WireMessage>, Arc<AtomicBool>) {
        let (in_tx, in_rx) = mpsc::channel(16);
        let (out_tx, out_rx) = mpsc::channel(16);
        let closed = Arc::new(AtomicBool::new(false));
        let reader = ChannelReader { inbound: in_rx };
        let writer = ChannelWriter { outbound: out_tx, closed: closed.clone() };
        (reader, in_tx, writer, out_rx, closed)
    }

    #[async_trait]
    impl SttReader for ChannelReader {
        async fn recv(&mut self) -> Result<Option<WireMessage>, RagKitError> {
            Ok(self.inbound.recv().await)
        }
    }

    #[async_trait]
    impl SttWriter for ChannelWriter {
        async fn send(&mut self, message: WireMessage) -> Result<(), RagKitError> {
            self.outbound
                .send(message)
                .await
                .map_err(|_| RagKitError::transport("channel", None, "receiver dropped"))
        }

        async fn close(&mut self) -> Result<(), RagKitError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }
}
