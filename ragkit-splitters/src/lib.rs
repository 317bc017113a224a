pub mod markdown;
pub mod recursive;
pub mod token;
pub mod tokenizer;

pub use markdown::MarkdownSplitter;
pub use recursive::RecursiveSplitter;
pub use token::TokenSplitter;
pub use tokenizer::{SimpleTokenizer, Tokenizer};

use std::sync::Arc;

/// Registers `"recursive"`, `"markdown"`, and `"token"` into the shared
/// splitter registry, reading `chunk_size`/`chunk_overlap`/`preserve_headers`
/// options where applicable.
pub fn register_defaults() {
    let registry = ragkit_provider::splitters();

    registry.register("recursive", |config| {
        let mut splitter = RecursiveSplitter::new();
        if let Some(size) = config.option_i64("chunk_size") {
            splitter = splitter.with_chunk_size(size);
        }
        if let Some(overlap) = config.option_i64("chunk_overlap") {
            splitter = splitter.with_chunk_overlap(overlap);
        }
        Ok(Arc::new(splitter) as Arc<dyn ragkit_provider::Splitter>)
    });

    registry.register("markdown", |config| {
        let mut splitter = MarkdownSplitter::new();
        if let Some(size) = config.option_i64("chunk_size") {
            splitter = splitter.with_chunk_size(size);
        }
        if let Some(overlap) = config.option_i64("chunk_overlap") {
            splitter = splitter.with_chunk_overlap(overlap);
        }
        if let Some(preserve) = config.option_bool("preserve_headers") {
            splitter = splitter.with_preserve_headers(preserve);
        }
        Ok(Arc::new(splitter) as Arc<dyn ragkit_provider::Splitter>)
    });

    registry.register("token", |config| {
        let mut splitter = TokenSplitter::new();
        if let Some(size) = config.option_i64("chunk_size") {
            splitter = splitter.with_chunk_size(size);
        }
        if let Some(overlap) = config.option_i64("chunk_overlap") {
            splitter = splitter.with_chunk_overlap(overlap);
        }
        Ok(Arc::new(splitter) as Arc<dyn ragkit_provider::Splitter>)
    });
}
