use crate::transport::{error_body, send_with_retry};
use async_trait::async_trait;
use ragkit_core::document::keys;
use ragkit_core::{Document, ProviderConfig, RagKitError};
use ragkit_provider::Loader;
use ragkit_provider_utils::{build_client, poll_until_done, AuthScheme, PollOutcome, PollingTranscriber, DEFAULT_POLL_INTERVAL};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Loads text extracted from a document (PDF, scan, …) by a submit-then-poll
/// document-AI provider. Source grammar: an http(s) URL or a local path
/// (spec.md §4.2.5/§6); the loader forwards the source string to the
/// provider's job-submission endpoint as-is.
pub struct DocumentAiLoader {
    client: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
}

impl DocumentAiLoader {
    pub fn new(config: &ProviderConfig) -> Result<Self, RagKitError> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| RagKitError::invalid_config_builder("base_url").message("document-AI loader requires base_url").build())?;
        let client = build_client(config, AuthScheme::Bearer, "ragkit-loader-remote/0.1")?;
        let poll_interval = config
            .options
            .get("poll_interval_ms")
            .and_then(|v| v.as_u64())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        Ok(Self { client, base_url, poll_interval })
    }

    async fn submit(&self, source: &str) -> Result<String, RagKitError> {
        let url = format!("{}/jobs", self.base_url);
        let response = send_with_retry(&url, || self.client.post(&url).json(&json!({ "source": source }))).await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response, &url).await;
            return Err(RagKitError::transport(&url, Some(status.as_u16()), body));
        }

        let submitted: SubmitResponse = response
            .json()
            .await
            .map_err(|e| RagKitError::decode("json", e.to_string()))?;
        Ok(submitted.id)
    }
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Deserialize)]
struct JobStatusResponse {
    status: String,
    text: Option<String>,
    error: Option<String>,
}

struct DocumentAiJob<'a> {
    client: &'a reqwest::Client,
    url: String,
}

#[async_trait]
impl<'a> PollingTranscriber for DocumentAiJob<'a> {
    type Output = String;

    async fn poll(&self) -> Result<PollOutcome<String>, RagKitError> {
        let response = send_with_retry(&self.url, || self.client.get(&self.url)).await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response, &self.url).await;
            return Err(RagKitError::transport(&self.url, Some(status.as_u16()), body));
        }

        let job: JobStatusResponse = response
            .json()
            .await
            .map_err(|e| RagKitError::decode("json", e.to_string()))?;

        match job.status.as_str() {
            "completed" | "done" => Ok(PollOutcome::Done(job.text.unwrap_or_default())),
            "error" | "failed" => Ok(PollOutcome::Failed(job.error.unwrap_or_else(|| "unknown error".to_string()))),
            _ => Ok(PollOutcome::Pending),
        }
    }
}

#[async_trait]
impl Loader for DocumentAiLoader {
    async fn load(&self, source: &str) -> Result<Vec<Document>, RagKitError> {
        let job_id = self.submit(source).await?;
        let job = DocumentAiJob {
            client: &self.client,
            url: format!("{}/jobs/{}", self.base_url, job_id),
        };
        let text = poll_until_done(&job, self.poll_interval).await?;

        if text.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![Document::new(source, text)
            .with_meta(keys::SOURCE, source)
            .with_meta(keys::LOADER, "document_ai")
            .with_meta("job_id", job_id)])
    }

    fn name(&self) -> &str {
        "document_ai"
    }
}
