use thiserror::Error;

mod invalid_config;
mod registry;

pub use invalid_config::InvalidConfigErrorBuilder;
pub use registry::UnknownProviderErrorBuilder;

/// Errors that can occur anywhere in the RAG ingestion core.
///
/// This is the umbrella error type every crate in the workspace returns
/// directly (loaders, splitters, the STT engine, the registries, the
/// pipeline) rather than each defining its own crate-local enum that only
/// wraps this one — unlike `llm-kit-core::AISDKError` wrapping
/// `llm-kit-provider::ProviderError`, none of these crates have failure
/// modes of their own that `RagKitError`'s variants don't already cover, so
/// a second layer of enums would just proxy every variant through
/// unchanged.
///
/// The taxonomy follows six categories: configuration, input, transport,
/// content-decoding, remote-processing, and cancellation errors.
#[derive(Debug, Error)]
pub enum RagKitError {
    /// A factory or provider configuration was invalid (missing API key,
    /// empty base URL where required, invalid source format).
    #[error("invalid config for '{field}': {message}")]
    InvalidConfig {
        /// The configuration field at fault.
        field: String,
        /// Why the value is invalid.
        message: String,
    },

    /// A registry lookup failed because the name was never registered.
    #[error("unknown {registry} provider '{name}'; known providers: {known:?}")]
    UnknownProvider {
        /// Which registry was queried (`"loader"`, `"splitter"`, `"stt"`).
        registry: String,
        /// The name that was not found.
        name: String,
        /// Snapshot of the names that were registered at lookup time.
        known: Vec<String>,
    },

    /// A programming error: an empty name, an absent factory, or a duplicate
    /// registration against a `Fail` registry.
    #[error("registry error: {0}")]
    RegistryMisuse(String),

    /// `Load` failed because of the input itself (malformed CSV, invalid
    /// JSON, a missing path segment, an empty source string).
    #[error("failed to load '{source_id}': {message}")]
    Load {
        /// The source string that was being loaded.
        source_id: String,
        /// Description of the failure.
        message: String,
    },

    /// A remote call failed at the transport layer (connect failure,
    /// non-2xx HTTP response, WebSocket dial/read/write failure).
    #[error("transport error calling {url}: {message}{}", status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Transport {
        /// The URL or endpoint that was called.
        url: String,
        /// HTTP status code, if the failure was a non-2xx response.
        status: Option<u16>,
        /// Description of the failure, including a response-body excerpt
        /// when available.
        message: String,
    },

    /// Decoding the response/content failed (base64, JSON, multipart).
    #[error("decode error at stage '{stage}': {message}")]
    Decode {
        /// The decoding stage that failed (e.g. `"base64"`, `"json"`).
        stage: String,
        /// Description of the failure.
        message: String,
    },

    /// A remote provider reported a processing failure (a document-AI or
    /// transcription job whose status came back `error`).
    #[error("{provider} reported a processing error: {message}")]
    RemoteProcessing {
        /// The provider name.
        provider: String,
        /// The provider's own error message.
        message: String,
    },

    /// The operation was cancelled before completion.
    #[error("operation cancelled")]
    Cancelled,

    /// A pipeline stage (a loader or a transformer) failed; the index
    /// identifies which stage, per spec.md §4.2.6.
    #[error("{stage} #{index} failed")]
    Pipeline {
        /// `"loader"` or `"transformer"`.
        stage: &'static str,
        /// 0-based index of the failing stage.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<RagKitError>,
    },

    /// Wraps a filesystem I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RagKitError {
    /// Convenience constructor for [`RagKitError::Load`].
    pub fn load(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`RagKitError::Transport`].
    pub fn transport(
        url: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::Transport {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`RagKitError::Decode`].
    pub fn decode(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`RagKitError::RemoteProcessing`].
    pub fn remote_processing(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteProcessing {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Tags `self` as having failed at pipeline stage `index`.
    pub fn at_pipeline_stage(self, stage: &'static str, index: usize) -> Self {
        Self::Pipeline {
            stage,
            index,
            source: Box::new(self),
        }
    }

    /// Starts a builder for [`RagKitError::UnknownProvider`].
    pub fn unknown_provider_builder(
        registry: impl Into<String>,
        name: impl Into<String>,
    ) -> UnknownProviderErrorBuilder {
        UnknownProviderErrorBuilder::new(registry, name)
    }

    /// Starts a builder for [`RagKitError::InvalidConfig`].
    pub fn invalid_config_builder(field: impl Into<String>) -> InvalidConfigErrorBuilder {
        InvalidConfigErrorBuilder::new(field)
    }
}
