pub mod codec;
pub mod engine;
pub mod frame_processor;
pub mod transport;

pub use codec::{JsonEventCodec, SttCodec};
pub use engine::WebSocketSttEngine;
pub use frame_processor::WebSocketFrameProcessor;
pub use transport::{SttReader, SttWriter, WireMessage};

use std::sync::Arc;

/// Registers `"websocket"` into the shared STT registry, reading `base_url`
/// from the factory configuration. Registration uses
/// [`ragkit_provider::RegistrationPolicy::Fail`] (set on the registry
/// itself): calling this twice panics, per spec.md §4.1/§7.
pub fn register_defaults() {
    let registry = ragkit_provider::stt_engines();

    registry.register("websocket", |config| {
        let base_url = config.base_url.clone().ok_or_else(|| {
            ragkit_core::RagKitError::invalid_config_builder("base_url")
                .message("websocket STT engine requires base_url")
                .build()
        })?;
        Ok(Arc::new(WebSocketSttEngine::new(base_url, JsonEventCodec)) as Arc<dyn ragkit_provider::SttEngine>)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragkit_core::ProviderConfig;

    // The STT registry uses RegistrationPolicy::Fail, and it's a single
    // process-wide static shared by every test in this binary, so
    // register_defaults() must run at most once across the whole module.
    #[test]
    fn registers_websocket_engine_and_requires_base_url() {
        register_defaults();

        assert!(ragkit_provider::stt_engines().list().contains(&"websocket".to_string()));

        let err = ragkit_provider::stt_engines()
            .new_instance("websocket", &ProviderConfig::new())
            .unwrap_err();
        assert!(matches!(err, ragkit_core::RagKitError::InvalidConfig { .. }));

        let config = ProviderConfig::new().with_base_url("wss://example.test/stream");
        assert!(ragkit_provider::stt_engines().new_instance("websocket", &config).is_ok());
    }
}
