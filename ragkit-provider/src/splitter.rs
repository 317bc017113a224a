use ragkit_core::Document;

/// Splits text into chunks.
///
/// Unlike [`crate::loader::Loader`], splitting is synchronous — every
/// splitter in spec.md §4.3 is pure CPU-bound string processing with no I/O.
pub trait Splitter: Send + Sync {
    /// Splits `text` into an ordered list of chunk strings. An empty input
    /// yields an empty output, never a single empty chunk.
    fn split(&self, text: &str) -> Vec<String>;

    /// Splits every document's content and re-expands it into chunk
    /// documents via [`Document::chunk_of`].
    ///
    /// This is a thin, identical projection across every splitter (spec.md
    /// §4.3 intro), so it has one shared default implementation rather than
    /// being reimplemented per splitter.
    fn split_documents(&self, documents: &[Document]) -> Vec<Document> {
        let mut out = Vec::new();
        for document in documents {
            let chunks = self.split(&document.content);
            let total = chunks.len();
            out.extend(
                chunks
                    .into_iter()
                    .enumerate()
                    .map(|(index, chunk)| Document::chunk_of(document, index, total, chunk)),
            );
        }
        out
    }

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSplitter(Vec<&'static str>);
    impl Splitter for FixedSplitter {
        fn split(&self, _text: &str) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    #[test]
    fn split_documents_expands_and_tags_chunks() {
        let splitter = FixedSplitter(vec!["a", "b"]);
        let docs = vec![Document::new("doc1", "whatever")];
        let out = splitter.split_documents(&docs);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, "doc1#chunk0");
        assert_eq!(out[1].id, "doc1#chunk1");
        assert_eq!(out[0].metadata["chunk_total"], serde_json::json!(2));
    }

    #[test]
    fn split_documents_handles_empty_split() {
        struct EmptySplitter;
        impl Splitter for EmptySplitter {
            fn split(&self, _text: &str) -> Vec<String> {
                Vec::new()
            }
        }
        let out = EmptySplitter.split_documents(&[Document::new("doc1", "")]);
        assert!(out.is_empty());
    }
}
