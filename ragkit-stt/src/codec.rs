use crate::transport::WireMessage;
use ragkit_core::{RagKitError, TranscriptEvent};
use ragkit_provider::TranscribeOptions;
use serde::Deserialize;
use serde_json::json;

/// Translates between a provider's realtime wire format and the canonical
/// [`TranscriptEvent`] boundary (spec.md §4.4.1). Each streaming STT provider
/// implements one; the dual-task session in [`crate::engine`] is generic
/// over it.
pub trait SttCodec: Send + Sync {
    /// Builds the WebSocket URL to dial from the engine's `base_url` and the
    /// caller's options (language, sample rate, …).
    fn dial_url(&self, base_url: &str, options: &TranscribeOptions) -> Result<String, RagKitError>;

    /// Encodes one outgoing audio chunk as a transport message.
    fn encode_audio(&self, chunk: Vec<u8>) -> WireMessage;

    /// The provider's terminate/close-stream sentinel, sent once the
    /// caller's audio sequence is drained. `None` if the provider relies on
    /// the WebSocket close frame alone.
    fn terminate_message(&self) -> Option<WireMessage> {
        None
    }

    /// Parses one inbound message. Returns `Ok(None)` for messages that
    /// don't map to a transcript event (metadata, keepalives) — these are
    /// silently skipped per spec.md §7.
    fn decode_message(&self, message: WireMessage) -> Result<Option<TranscriptEvent>, RagKitError>;
}

/// Reference codec for providers whose realtime protocol is JSON text frames
/// shaped `{"text": "...", "is_final": bool}` with audio sent as raw binary
/// frames — the shape several realtime transcription APIs follow closely
/// enough to serve as the default.
pub struct JsonEventCodec;

#[derive(Deserialize)]
struct WireEvent {
    #[serde(default)]
    text: String,
    #[serde(default)]
    is_final: bool,
    #[serde(default)]
    message_type: Option<String>,
}

impl SttCodec for JsonEventCodec {
    fn dial_url(&self, base_url: &str, options: &TranscribeOptions) -> Result<String, RagKitError> {
        let mut url = url::Url::parse(base_url).map_err(|e| {
            RagKitError::invalid_config_builder("base_url").message(e.to_string()).build()
        })?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(rate) = options.sample_rate_hz {
                query.append_pair("sample_rate", &rate.to_string());
            }
            if let Some(language) = &options.language {
                query.append_pair("language", language);
            }
            if let Some(encoding) = &options.encoding {
                query.append_pair("encoding", encoding);
            }
        }
        Ok(url.to_string())
    }

    fn encode_audio(&self, chunk: Vec<u8>) -> WireMessage {
        WireMessage::Binary(chunk)
    }

    fn terminate_message(&self) -> Option<WireMessage> {
        Some(WireMessage::Text(json!({ "terminate_session": true }).to_string()))
    }

    fn decode_message(&self, message: WireMessage) -> Result<Option<TranscriptEvent>, RagKitError> {
        let WireMessage::Text(text) = message else {
            return Ok(None);
        };
        let Ok(event) = serde_json::from_str::<WireEvent>(&text) else {
            return Ok(None);
        };
        if matches!(event.message_type.as_deref(), Some("SessionBegins") | Some("SessionTerminated")) {
            return Ok(None);
        }
        Ok(TranscriptEvent::new(event.text, event.is_final, 0.0).non_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dial_url_carries_options_as_query_params() {
        let codec = JsonEventCodec;
        let options = TranscribeOptions::new().with_sample_rate_hz(16000).with_language("en");
        let url = codec.dial_url("wss://example.test/stream", &options).unwrap();
        assert!(url.contains("sample_rate=16000"));
        assert!(url.contains("language=en"));
    }

    #[test]
    fn decode_skips_metadata_messages() {
        let codec = JsonEventCodec;
        let message = WireMessage::Text(r#"{"message_type":"SessionBegins"}"#.to_string());
        assert!(codec.decode_message(message).unwrap().is_none());
    }

    #[test]
    fn decode_skips_empty_text() {
        let codec = JsonEventCodec;
        let message = WireMessage::Text(r#"{"text":"","is_final":false}"#.to_string());
        assert!(codec.decode_message(message).unwrap().is_none());
    }

    #[test]
    fn decode_parses_final_event() {
        let codec = JsonEventCodec;
        let message = WireMessage::Text(r#"{"text":"hello world","is_final":true}"#.to_string());
        let event = codec.decode_message(message).unwrap().unwrap();
        assert_eq!(event.text, "hello world");
        assert!(event.is_final);
    }

    #[test]
    fn decode_ignores_binary_frames() {
        let codec = JsonEventCodec;
        assert!(codec.decode_message(WireMessage::Binary(vec![1, 2, 3])).unwrap().is_none());
    }
}
