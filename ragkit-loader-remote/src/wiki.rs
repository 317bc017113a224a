use crate::transport::{error_body, send_with_retry};
use async_trait::async_trait;
use ragkit_core::document::keys;
use ragkit_core::{Document, ProviderConfig, RagKitError};
use ragkit_provider::Loader;
use ragkit_provider_utils::{build_client, AuthScheme};
use serde::Deserialize;

/// Loads a single wiki page. Source grammar: `<page_id>` or
/// `<space>/<page_id>` (spec.md §4.2.5/§6).
pub struct WikiLoader {
    client: reqwest::Client,
    base_url: String,
}

impl WikiLoader {
    pub fn new(config: &ProviderConfig) -> Result<Self, RagKitError> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| RagKitError::invalid_config_builder("base_url").message("wiki loader requires base_url").build())?;
        let client = build_client(config, AuthScheme::Bearer, "ragkit-loader-remote/0.1")?;
        Ok(Self { client, base_url })
    }
}

#[derive(Deserialize)]
struct WikiPageResponse {
    title: String,
    body: WikiBody,
}

#[derive(Deserialize)]
struct WikiBody {
    storage: WikiStorage,
}

#[derive(Deserialize)]
struct WikiStorage {
    value: String,
}

fn split_source(source: &str) -> (Option<&str>, &str) {
    match source.split_once('/') {
        Some((space, page_id)) => (Some(space), page_id),
        None => (None, source),
    }
}

#[async_trait]
impl Loader for WikiLoader {
    async fn load(&self, source: &str) -> Result<Vec<Document>, RagKitError> {
        let (space, page_id) = split_source(source);
        let url = format!("{}/rest/api/content/{}?expand=body.storage", self.base_url, page_id);

        let response = send_with_retry(&url, || self.client.get(&url)).await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response, &url).await;
            let excerpt: String = body.chars().take(500).collect();
            return Err(RagKitError::transport(&url, Some(status.as_u16()), excerpt));
        }

        let page: WikiPageResponse = response
            .json()
            .await
            .map_err(|e| RagKitError::decode("json", e.to_string()))?;

        if page.body.storage.value.is_empty() {
            return Ok(Vec::new());
        }

        let mut document = Document::new(source, page.body.storage.value)
            .with_meta(keys::SOURCE, source)
            .with_meta(keys::LOADER, "wiki")
            .with_meta("page_id", page_id)
            .with_meta("title", page.title);
        if let Some(space) = space {
            document = document.with_meta("space", space);
        }
        Ok(vec![document])
    }

    fn name(&self) -> &str {
        "wiki"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_space_and_page_id() {
        assert_eq!(split_source("ENG/12345"), (Some("ENG"), "12345"));
        assert_eq!(split_source("12345"), (None, "12345"));
    }
}
