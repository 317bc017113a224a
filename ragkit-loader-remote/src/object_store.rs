use crate::transport::{error_body, send_with_retry};
use async_trait::async_trait;
use ragkit_core::document::keys;
use ragkit_core::{Document, ProviderConfig, RagKitError};
use ragkit_provider::Loader;
use ragkit_provider_utils::{build_client, AuthScheme};

const ACCEPTED_SCHEMES: &[&str] = &["s3", "gs", "az"];

/// Loads a single object from a cloud object store. Source grammar:
/// `<scheme>://<bucket>/<key>`, scheme in `{s3, gs, az}` (spec.md §4.2.5/§6).
pub struct ObjectStoreLoader {
    client: reqwest::Client,
    azure_account: Option<String>,
}

impl ObjectStoreLoader {
    pub fn new(config: &ProviderConfig) -> Result<Self, RagKitError> {
        let client = build_client(config, AuthScheme::Bearer, "ragkit-loader-remote/0.1")?;
        Ok(Self {
            client,
            azure_account: config.option_str("azure_account").map(str::to_string),
        })
    }

    fn vendor_url(&self, scheme: &str, bucket: &str, key: &str) -> Result<String, RagKitError> {
        match scheme {
            "s3" => Ok(format!("https://{bucket}.s3.amazonaws.com/{key}")),
            "gs" => Ok(format!("https://storage.googleapis.com/{bucket}/{key}")),
            "az" => {
                let account = self.azure_account.as_deref().ok_or_else(|| {
                    RagKitError::invalid_config_builder("azure_account")
                        .message("az:// sources require the azure_account option")
                        .build()
                })?;
                Ok(format!("https://{account}.blob.core.windows.net/{bucket}/{key}"))
            }
            other => Err(RagKitError::load(
                format!("{other}://{bucket}/{key}"),
                format!("unrecognised object store scheme '{other}'; accepted: {ACCEPTED_SCHEMES:?}"),
            )),
        }
    }
}

struct ParsedSource {
    scheme: String,
    bucket: String,
    key: String,
}

fn parse_source(source: &str) -> Result<ParsedSource, RagKitError> {
    let (scheme, rest) = source.split_once("://").ok_or_else(|| {
        RagKitError::load(source, format!("expected '<scheme>://<bucket>/<key>'; accepted schemes: {ACCEPTED_SCHEMES:?}"))
    })?;
    let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));

    if bucket.is_empty() || key.is_empty() {
        return Err(RagKitError::load(source, "bucket and key must both be non-empty"));
    }

    Ok(ParsedSource {
        scheme: scheme.to_string(),
        bucket: bucket.to_string(),
        key: key.to_string(),
    })
}

#[async_trait]
impl Loader for ObjectStoreLoader {
    async fn load(&self, source: &str) -> Result<Vec<Document>, RagKitError> {
        let parsed = parse_source(source)?;
        let url = self.vendor_url(&parsed.scheme, &parsed.bucket, &parsed.key)?;

        let response = send_with_retry(&url, || self.client.get(&url)).await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response, &url).await;
            let excerpt: String = body.chars().take(500).collect();
            return Err(RagKitError::transport(&url, Some(status.as_u16()), excerpt));
        }

        let content = response
            .text()
            .await
            .map_err(|e| RagKitError::transport(&url, None, e.to_string()))?;

        if content.is_empty() {
            return Ok(Vec::new());
        }

        let filename = parsed.key.rsplit('/').next().unwrap_or(&parsed.key).to_string();
        Ok(vec![Document::new(source, content)
            .with_meta(keys::SOURCE, source)
            .with_meta(keys::LOADER, "object_store")
            .with_meta("bucket", parsed.bucket)
            .with_meta("key", parsed.key)
            .with_meta("filename", filename)])
    }

    fn name(&self) -> &str {
        "object_store"
    }
}
