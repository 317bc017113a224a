use async_trait::async_trait;
use ragkit_core::document::keys;
use ragkit_core::{Document, RagKitError};
use ragkit_provider::Loader;
use std::path::Path;

/// Loads a single file verbatim as UTF-8 text (spec.md §4.2.1).
pub struct TextLoader;

#[async_trait]
impl Loader for TextLoader {
    async fn load(&self, source: &str) -> Result<Vec<Document>, RagKitError> {
        let bytes = tokio::fs::read(source)
            .await
            .map_err(|e| RagKitError::load(source, e.to_string()))?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let name = basename(source);

        Ok(vec![Document::new(source, content)
            .with_meta(keys::SOURCE, source)
            .with_meta(keys::FORMAT, "text")
            .with_meta(keys::NAME, name)])
    }

    fn name(&self) -> &str {
        "text"
    }
}

pub(crate) fn basename(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_file_content_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        tokio::fs::write(&path, "hello world").await.unwrap();
        let source = path.to_str().unwrap();

        let docs = TextLoader.load(source).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "hello world");
        assert_eq!(docs[0].meta_str(keys::FORMAT), Some("text"));
        assert_eq!(docs[0].meta_str(keys::NAME), Some("note.txt"));
    }

    #[tokio::test]
    async fn missing_file_propagates_error() {
        let err = TextLoader.load("/no/such/file.txt").await.unwrap_err();
        assert!(matches!(err, RagKitError::Load { .. }));
    }

    #[tokio::test]
    async fn empty_file_yields_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        tokio::fs::write(&path, "").await.unwrap();
        let docs = TextLoader.load(path.to_str().unwrap()).await.unwrap();
        assert!(docs.is_empty());
    }
}
