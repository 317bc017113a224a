use crate::text::basename;
use async_trait::async_trait;
use ragkit_core::document::keys;
use ragkit_core::{Document, RagKitError};
use ragkit_provider::Loader;

/// Loads a Markdown file verbatim, as a single document (spec.md §4.2.4).
/// Structural chunking happens downstream, in the Markdown splitter.
pub struct MarkdownLoader;

#[async_trait]
impl Loader for MarkdownLoader {
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
            .with_meta(keys::FORMAT, "markdown")
            .with_meta(keys::NAME, name)])
    }

    fn name(&self) -> &str {
        "markdown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_markdown_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        tokio::fs::write(&path, "# Title\n\nBody.").await.unwrap();
        let source = path.to_str().unwrap();

        let docs = MarkdownLoader.load(source).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "# Title\n\nBody.");
        assert_eq!(docs[0].meta_str(keys::FORMAT), Some("markdown"));
    }

    #[tokio::test]
    async fn empty_file_yields_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.md");
        tokio::fs::write(&path, "").await.unwrap();
        let docs = MarkdownLoader.load(path.to_str().unwrap()).await.unwrap();
        assert!(docs.is_empty());
    }
}
