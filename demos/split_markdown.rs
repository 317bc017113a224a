/// Splits a small Markdown document with the default splitter registry.
///
/// Run with:
/// ```bash
/// cargo run --example split_markdown
/// ```
use ragkit_core::ProviderConfig;

fn main() {
    ragkit_splitters::register_defaults();

    let text = "\
# RAG Kit

RAG Kit ingests documents, splits them into chunks, and streams speech to text.

## Loaders

File, object-store, wiki, repository-host, document-AI, and web loaders all
produce the same `Document` shape.

## Splitters

Recursive, Markdown-aware, and token-budget splitters all implement the same
`Splitter` trait.
";

    let config = ProviderConfig::new()
        .with_option("chunk_size", 120)
        .with_option("chunk_overlap", 20);

    let splitter = ragkit_provider::splitters()
        .new_instance("markdown", &config)
        .expect("markdown splitter is registered");

    for (index, chunk) in splitter.split(text).iter().enumerate() {
        println!("--- chunk {index} ({} chars) ---", chunk.chars().count());
        println!("{chunk}\n");
    }
}
