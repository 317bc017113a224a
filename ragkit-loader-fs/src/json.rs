use crate::text::basename;
use async_trait::async_trait;
use ragkit_core::document::keys;
use ragkit_core::{Document, RagKitError};
use ragkit_provider::Loader;
use serde_json::Value;

/// Loads a JSON file, expanding a list-shaped value (or a navigated-into one)
/// into one document per element (spec.md §4.2.2).
pub struct JsonLoader {
    /// Dot-separated path navigated before list expansion. Each hop must
    /// resolve to an object; an empty path is a no-op.
    pub jq_path: Option<String>,
    /// When set, each item must be an object and this key's value becomes
    /// `content`.
    pub content_key: Option<String>,
}

impl JsonLoader {
    pub fn new() -> Self {
        Self {
            jq_path: None,
            content_key: None,
        }
    }

    #[must_use]
    pub fn with_jq_path(mut self, path: impl Into<String>) -> Self {
        self.jq_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_content_key(mut self, key: impl Into<String>) -> Self {
        self.content_key = Some(key.into());
        self
    }
}

impl Default for JsonLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks `path` one object-key hop at a time; a missing key or a non-object
/// intermediate value is a hard failure, per spec.md §4.2.2 (unlike the
/// lenient `json_path` helper in `ragkit-provider-utils`, which is used
/// where an absent path should fall back rather than error).
fn navigate(value: &Value, path: &str) -> Result<Value, RagKitError> {
    let mut current = value.clone();
    for key in path.split('.') {
        let Some(object) = current.as_object() else {
            return Err(RagKitError::load(
                "<jq_path>",
                format!("json parse error: '{key}' expects an object, found {current}"),
            ));
        };
        current = object
            .get(key)
            .cloned()
            .ok_or_else(|| RagKitError::load("<jq_path>", format!("json parse error: missing key '{key}'")))?;
    }
    Ok(current)
}

fn content_from(item: &Value, content_key: &Option<String>) -> Result<String, RagKitError> {
    match content_key {
        None => Ok(item.to_string()),
        Some(key) => {
            let object = item
                .as_object()
                .ok_or_else(|| RagKitError::load("<content_key>", "json parse error: item is not an object"))?;
            let value = object
                .get(key)
                .ok_or_else(|| RagKitError::load("<content_key>", format!("json parse error: missing key '{key}'")))?;
            Ok(match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        }
    }
}

#[async_trait]
impl Loader for JsonLoader {
    async fn load(&self, source: &str) -> Result<Vec<Document>, RagKitError> {
        let bytes = tokio::fs::read(source)
            .await
            .map_err(|e| RagKitError::load(source, e.to_string()))?;
        let parsed: Value = serde_json::from_slice(&bytes)
            .map_err(|e| RagKitError::load(source, format!("json parse error: {e}")))?;

        let navigated = match &self.jq_path {
            Some(path) if !path.is_empty() => navigate(&parsed, path)?,
            _ => parsed,
        };

        let items: Vec<Value> = match navigated {
            Value::Array(items) => items,
            other => vec![other],
        };

        let name = basename(source);
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let content = content_from(item, &self.content_key)?;
                Ok(Document::new(format!("{source}#{index}"), content)
                    .with_meta(keys::SOURCE, source)
                    .with_meta(keys::FORMAT, "json")
                    .with_meta(keys::NAME, name.clone())
                    .with_meta("index", index as u64))
            })
            .collect()
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_json(contents: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        tokio::fs::write(&path, contents).await.unwrap();
        let source = path.to_str().unwrap().to_string();
        (dir, source)
    }

    #[tokio::test]
    async fn jq_path_and_content_key_expand_items() {
        let (_dir, source) =
            write_json(r#"{"data": {"items": [{"content":"item1"}, {"content":"item2"}]}}"#).await;
        let loader = JsonLoader::new()
            .with_jq_path("data.items")
            .with_content_key("content");
        let docs = loader.load(&source).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, "item1");
        assert_eq!(docs[1].content, "item2");
        assert_eq!(docs[0].metadata["index"], serde_json::json!(0));
    }

    #[tokio::test]
    async fn scalar_value_wraps_in_single_element_list() {
        let (_dir, source) = write_json(r#""just text""#).await;
        let docs = JsonLoader::new().load(&source).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "\"just text\"");
    }

    #[tokio::test]
    async fn missing_content_key_fails() {
        let (_dir, source) = write_json(r#"[{"other":"x"}]"#).await;
        let loader = JsonLoader::new().with_content_key("content");
        assert!(loader.load(&source).await.is_err());
    }

    #[tokio::test]
    async fn missing_jq_path_segment_fails() {
        let (_dir, source) = write_json(r#"{"a": {}}"#).await;
        let loader = JsonLoader::new().with_jq_path("a.b");
        assert!(loader.load(&source).await.is_err());
    }
}
