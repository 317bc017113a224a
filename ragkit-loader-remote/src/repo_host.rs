use crate::transport::{error_body, send_with_retry};
use async_trait::async_trait;
use base64::Engine;
use ragkit_core::document::keys;
use ragkit_core::{Document, ProviderConfig, RagKitError};
use ragkit_provider::Loader;
use ragkit_provider_utils::{build_client, AuthScheme};
use serde::Deserialize;

/// Loads a single file from a Git-forge code host (GitHub-compatible
/// contents API). Source grammar: `<owner>/<repo>/<path>`; an optional ref
/// (branch, tag, or SHA) is supplied via the `ref` config option (spec.md
/// §4.2.5/§6).
pub struct RepoHostLoader {
    client: reqwest::Client,
    base_url: String,
    git_ref: Option<String>,
}

impl RepoHostLoader {
    pub fn new(config: &ProviderConfig) -> Result<Self, RagKitError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.github.com".to_string());
        let client = build_client(config, AuthScheme::Bearer, "ragkit-loader-remote/0.1")?;
        Ok(Self {
            client,
            base_url,
            git_ref: config.option_str("ref").map(str::to_string),
        })
    }
}

#[derive(Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
    path: String,
    html_url: Option<String>,
}

fn split_source(source: &str) -> Result<(&str, &str, &str), RagKitError> {
    let mut parts = source.splitn(3, '/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), Some(path)) if !owner.is_empty() && !repo.is_empty() && !path.is_empty() => {
            Ok((owner, repo, path))
        }
        _ => Err(RagKitError::load(source, "expected '<owner>/<repo>/<path>'")),
    }
}

#[async_trait]
impl Loader for RepoHostLoader {
    async fn load(&self, source: &str) -> Result<Vec<Document>, RagKitError> {
        let (owner, repo, path) = split_source(source)?;
        let mut url = format!("{}/repos/{owner}/{repo}/contents/{path}", self.base_url);
        if let Some(git_ref) = &self.git_ref {
            url.push_str(&format!("?ref={git_ref}"));
        }

        let response = send_with_retry(&url, || self.client.get(&url)).await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response, &url).await;
            let excerpt: String = body.chars().take(500).collect();
            return Err(RagKitError::transport(&url, Some(status.as_u16()), excerpt));
        }

        let contents: ContentsResponse = response
            .json()
            .await
            .map_err(|e| RagKitError::decode("json", e.to_string()))?;

        let cleaned: String = contents.content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(cleaned)
            .map_err(|e| RagKitError::decode("base64", e.to_string()))?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        if content.is_empty() {
            return Ok(Vec::new());
        }

        let mut document = Document::new(source, content)
            .with_meta(keys::SOURCE, source)
            .with_meta(keys::LOADER, "repo_host")
            .with_meta("sha", contents.sha)
            .with_meta("path", contents.path);
        if let Some(html_url) = contents.html_url {
            document = document.with_meta("html_url", html_url);
        }
        Ok(vec![document])
    }

    fn name(&self) -> &str {
        "repo_host"
    }
}
