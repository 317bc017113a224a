use crate::error::RagKitError;

/// Builder for [`RagKitError::InvalidConfig`].
#[derive(Debug, Clone)]
pub struct InvalidConfigErrorBuilder {
    field: String,
    message: Option<String>,
}

impl InvalidConfigErrorBuilder {
    /// Starts a builder naming the offending configuration field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: None,
        }
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn build(self) -> RagKitError {
        RagKitError::InvalidConfig {
            field: self.field,
            message: self.message.unwrap_or_else(|| "invalid value".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_message_when_unset() {
        let error = InvalidConfigErrorBuilder::new("base_url").build();
        assert!(matches!(error, RagKitError::InvalidConfig { field, message }
            if field == "base_url" && message == "invalid value"));
    }
}
