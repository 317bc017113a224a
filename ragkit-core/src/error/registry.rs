use crate::error::RagKitError;

/// Builder for [`RagKitError::UnknownProvider`].
///
/// # Examples
///
/// ```
/// use ragkit_core::error::UnknownProviderErrorBuilder;
///
/// let error = UnknownProviderErrorBuilder::new("loader", "acme")
///     .known(vec!["text".to_string(), "json".to_string()])
///     .build();
/// assert!(error.to_string().contains("acme"));
/// ```
#[derive(Debug, Clone)]
pub struct UnknownProviderErrorBuilder {
    registry: String,
    name: String,
    known: Vec<String>,
}

impl UnknownProviderErrorBuilder {
    /// Starts a builder for an unknown-provider error in the named registry
    /// (e.g. `"loader"`, `"splitter"`, `"stt"`).
    pub fn new(registry: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            registry: registry.into(),
            name: name.into(),
            known: Vec::new(),
        }
    }

    /// Sets the currently registered names, for the diagnostic message.
    #[must_use]
    pub fn known(mut self, known: Vec<String>) -> Self {
        self.known = known;
        self
    }

    pub fn build(self) -> RagKitError {
        RagKitError::UnknownProvider {
            registry: self.registry,
            name: self.name,
            known: self.known,
        }
    }
}
