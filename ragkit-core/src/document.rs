use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dynamic metadata attached to a [`Document`].
///
/// Values are kept as [`serde_json::Value`] so loaders can attach whatever
/// shape of attribute their source produces (numbers, strings, nested
/// objects) without the core needing to know every provider's schema ahead
/// of time — the dynamism is confined to this boundary; splitters and the
/// STT core never inspect these values, only carry them forward.
pub type Metadata = HashMap<String, serde_json::Value>;

/// The universal ingestion record exchanged between loaders and splitters.
///
/// # Invariants
///
/// - [`Document::id`] is stable for a given source: file loaders use the
///   source path, optionally suffixed `#<row>`/`#<index>` for per-row/per-item
///   expansion; splitter output uses `<parent_id>#chunk<i>`; remote loaders
///   use whatever identifier the source assigns.
/// - [`Document::metadata`] is preserved across every transform unless a
///   transform explicitly augments it (splitters add `chunk_index`,
///   `chunk_total`, `parent_id`; they never remove an existing key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identity of this document; see the module docs for the id grammar
    /// used by each producer.
    pub id: String,
    /// The textual payload, post-decoding.
    pub content: String,
    /// Canonical attributes (`source`, `format`, `loader`, `name`, …) plus
    /// per-loader attributes.
    pub metadata: Metadata,
}

/// Canonical metadata keys every loader populates.
pub mod keys {
    pub const SOURCE: &str = "source";
    pub const FORMAT: &str = "format";
    pub const LOADER: &str = "loader";
    pub const NAME: &str = "name";
    pub const CHUNK_INDEX: &str = "chunk_index";
    pub const CHUNK_TOTAL: &str = "chunk_total";
    pub const PARENT_ID: &str = "parent_id";
}

impl Document {
    /// Creates a new document with empty metadata.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    /// Creates a new document with the given metadata.
    pub fn with_metadata(
        id: impl Into<String>,
        content: impl Into<String>,
        metadata: Metadata,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata,
        }
    }

    /// Inserts a single metadata entry, returning `self` for chaining.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Reads a string-valued metadata entry, if present and a JSON string.
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }

    /// Builds a splitter-output document: id is `<parent_id>#chunk<index>`,
    /// metadata is the parent's metadata with `chunk_index`, `chunk_total`,
    /// and `parent_id` added (invariant 2 of the data model).
    pub fn chunk_of(parent: &Document, index: usize, total: usize, content: impl Into<String>) -> Self {
        let mut metadata = parent.metadata.clone();
        metadata.insert(keys::CHUNK_INDEX.to_string(), serde_json::json!(index));
        metadata.insert(keys::CHUNK_TOTAL.to_string(), serde_json::json!(total));
        metadata.insert(keys::PARENT_ID.to_string(), serde_json::json!(parent.id));
        Self {
            id: format!("{}#chunk{}", parent.id, index),
            content: content.into(),
            metadata,
        }
    }
}
