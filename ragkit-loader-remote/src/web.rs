use crate::transport::{error_body, send_with_retry};
use async_trait::async_trait;
use ragkit_core::document::keys;
use ragkit_core::{Document, ProviderConfig, RagKitError};
use ragkit_provider::Loader;
use ragkit_provider_utils::{build_client, AuthScheme};
use scraper::{Html, Selector};

/// Loads the visible text content of a web page. Source is an http(s) URL
/// (spec.md §4.2.5/§6).
pub struct WebLoader {
    client: reqwest::Client,
}

impl WebLoader {
    pub fn new(config: &ProviderConfig) -> Result<Self, RagKitError> {
        let client = build_client(config, AuthScheme::Bearer, "ragkit-loader-remote/0.1")?;
        Ok(Self { client })
    }
}

/// Strips script/style elements and concatenates the remaining text nodes,
/// collapsing runs of whitespace the way a reader would expect from "page
/// text" rather than a literal DOM text dump.
fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let skip = Selector::parse("script, style, noscript").unwrap();
    let skip_nodes: std::collections::HashSet<_> = document.select(&skip).map(|e| e.id()).collect();

    let body_selector = Selector::parse("body").unwrap();
    let root = document
        .select(&body_selector)
        .next()
        .map(|e| e.id())
        .unwrap_or_else(|| document.root_element().id());

    let mut text = String::new();
    for node in document.tree.get(root).into_iter().flat_map(|n| n.descendants()) {
        if skip_nodes.contains(&node.id()) {
            continue;
        }
        if let Some(text_node) = node.value().as_text() {
            text.push_str(text_node);
            text.push(' ');
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl Loader for WebLoader {
    async fn load(&self, source: &str) -> Result<Vec<Document>, RagKitError> {
        let response = send_with_retry(source, || self.client.get(source)).await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response, source).await;
            let excerpt: String = body.chars().take(500).collect();
            return Err(RagKitError::transport(source, Some(status.as_u16()), excerpt));
        }

        let html = response
            .text()
            .await
            .map_err(|e| RagKitError::transport(source, None, e.to_string()))?;
        let text = extract_text(&html);

        if text.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![Document::new(source, text)
            .with_meta(keys::SOURCE, source)
            .with_meta(keys::LOADER, "web")])
    }

    fn name(&self) -> &str {
        "web"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_and_skips_scripts() {
        let html = "<html><body><script>ignored();</script><p>Hello <b>world</b></p></body></html>";
        let text = extract_text(html);
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn empty_body_yields_empty_text() {
        assert_eq!(extract_text("<html><body></body></html>"), "");
    }
}
