pub mod document_ai;
pub mod object_store;
pub mod repo_host;
mod transport;
pub mod web;
pub mod wiki;

pub use document_ai::DocumentAiLoader;
pub use object_store::ObjectStoreLoader;
pub use repo_host::RepoHostLoader;
pub use web::WebLoader;
pub use wiki::WikiLoader;

use std::sync::Arc;

/// Registers `"object_store"`, `"wiki"`, `"repo_host"`, `"document_ai"`, and
/// `"web"` into the shared loader registry.
pub fn register_defaults() {
    let registry = ragkit_provider::loaders();

    registry.register("object_store", |config| {
        Ok(Arc::new(ObjectStoreLoader::new(config)?) as Arc<dyn ragkit_provider::Loader>)
    });
    registry.register("wiki", |config| {
        Ok(Arc::new(WikiLoader::new(config)?) as Arc<dyn ragkit_provider::Loader>)
    });
    registry.register("repo_host", |config| {
        Ok(Arc::new(RepoHostLoader::new(config)?) as Arc<dyn ragkit_provider::Loader>)
    });
    registry.register("document_ai", |config| {
        Ok(Arc::new(DocumentAiLoader::new(config)?) as Arc<dyn ragkit_provider::Loader>)
    });
    registry.register("web", |config| {
        Ok(Arc::new(WebLoader::new(config)?) as Arc<dyn ragkit_provider::Loader>)
    });
}
