use ragkit_core::{ProviderConfig, RagKitError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How a request authenticates against a remote provider.
#[derive(Debug, Clone)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`.
    Bearer,
    /// `Authorization: <key>` verbatim — AssemblyAI's API takes the raw key
    /// with no `Bearer` prefix.
    Raw,
    /// A custom header name carries the key (e.g. document-AI providers that
    /// use `X-Api-Key`).
    Header(&'static str),
}

/// Builds a [`reqwest::Client`] from a [`ProviderConfig`], the way every
/// vendor crate in the teacher repo builds its own headers by hand — here
/// it's centralized once since every loader/STT provider needs the same
/// three ingredients: bearer-or-raw auth, freeform custom headers, and a
/// user agent.
pub fn build_client(
    config: &ProviderConfig,
    auth: AuthScheme,
    user_agent: &str,
) -> Result<reqwest::Client, RagKitError> {
    let mut headers = HeaderMap::new();

    if let Some(api_key) = &config.api_key {
        let (name, value) = match auth {
            AuthScheme::Bearer => (AUTHORIZATION, format!("Bearer {api_key}")),
            AuthScheme::Raw => (AUTHORIZATION, api_key.clone()),
            AuthScheme::Header(name) => {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(api_key)?;
                headers.insert(header_name, header_value);
                (AUTHORIZATION, String::new())
            }
        };
        if !value.is_empty() {
            headers.insert(name, parse_header_value(&value)?);
        }
    }

    if let Some(extra) = config.options.get("headers").and_then(|v| v.as_object()) {
        for (key, value) in extra {
            let Some(value) = value.as_str() else { continue };
            headers.insert(parse_header_name(key)?, parse_header_value(value)?);
        }
    }

    headers.insert(USER_AGENT, parse_header_value(user_agent)?);

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout_or(DEFAULT_TIMEOUT))
        .build()
        .map_err(|e| RagKitError::transport("<client build>", None, e.to_string()))
}

fn parse_header_name(name: &str) -> Result<HeaderName, RagKitError> {
    HeaderName::try_from(name)
        .map_err(|e| RagKitError::invalid_config_builder("headers").message(e.to_string()).build())
}

fn parse_header_value(value: &str) -> Result<HeaderValue, RagKitError> {
    HeaderValue::try_from(value)
        .map_err(|e| RagKitError::invalid_config_builder("headers").message(e.to_string()).build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_client_with_bearer_auth() {
        let config = ProviderConfig::new().with_api_key("secret");
        let client = build_client(&config, AuthScheme::Bearer, "ragkit/0.1");
        assert!(client.is_ok());
    }

    #[test]
    fn builds_client_without_api_key() {
        let config = ProviderConfig::new();
        let client = build_client(&config, AuthScheme::Raw, "ragkit/0.1");
        assert!(client.is_ok());
    }

    #[test]
    fn rejects_invalid_custom_header_name() {
        let config = ProviderConfig::new()
            .with_option("headers", serde_json::json!({"bad header": "x"}));
        let result = build_client(&config, AuthScheme::Bearer, "ragkit/0.1");
        assert!(result.is_err());
    }
}
