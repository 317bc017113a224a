/// Loads a text file through the loader pipeline, then splits every loaded
/// document with the recursive splitter.
///
/// Run with:
/// ```bash
/// cargo run --example load_and_split
/// ```
use ragkit_core::ProviderConfig;
use ragkit_provider_utils::LoaderPipeline;

#[tokio::main]
async fn main() {
    ragkit_loader_fs::register_defaults();
    ragkit_splitters::register_defaults();

    let path = std::env::temp_dir().join("ragkit-load-and-split-demo.txt");
    let source = format!("{}\n\n{}", "word ".repeat(60), "word ".repeat(60));
    std::fs::write(&path, source).expect("write demo source file");

    let text_loader = ragkit_provider::loaders()
        .new_instance("text", &ProviderConfig::new())
        .expect("text loader is registered");

    let pipeline = LoaderPipeline::new().with_loader(text_loader);
    let documents = pipeline
        .run(&[path.to_string_lossy().into_owned()])
        .await
        .expect("pipeline run");

    let splitter = ragkit_provider::splitters()
        .new_instance("recursive", &ProviderConfig::new().with_option("chunk_size", 80))
        .expect("recursive splitter is registered");

    for document in &documents {
        println!("document {} ({} chars)", document.id, document.content.chars().count());
        for (index, chunk) in splitter.split_documents(std::slice::from_ref(document)).iter().enumerate() {
            println!("  chunk {index}: {:?}", chunk.content);
        }
    }

    let _ = std::fs::remove_file(&path);
}
