use async_trait::async_trait;
use ragkit_core::{Document, RagKitError};

/// Produces [`Document`]s from a single source string (a file path, a URL, a
/// query — the grammar is loader-specific).
///
/// An empty or absent result is represented as an empty `Vec`; callers never
/// distinguish "no documents" from "an empty list of documents" the way
/// spec.md §4.2 does in prose, since both collapse to the same value in
/// Rust.
#[async_trait]
pub trait Loader: Send + Sync {
    /// Loads every document `source` resolves to.
    async fn load(&self, source: &str) -> Result<Vec<Document>, RagKitError>;

    /// A short, stable name used as the `loader` metadata tag and in
    /// diagnostics. Defaults to the Rust type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A stage in a [`crate::pipeline`]-style document transformation chain:
/// receives the documents produced so far and returns the documents to carry
/// forward.
///
/// Kept here (rather than in `ragkit-provider-utils`) because it shares the
/// `Loader` trait's object-safety shape and is implemented by the same
/// crates that implement loaders.
#[async_trait]
pub trait Transformer: Send + Sync {
    async fn transform(&self, documents: Vec<Document>) -> Result<Vec<Document>, RagKitError>;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
