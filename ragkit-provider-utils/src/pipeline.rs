use ragkit_core::{Document, RagKitError};
use ragkit_provider::{Loader, Transformer};
use std::sync::Arc;

/// Runs an ordered list of loaders, concatenates their output, then runs an
/// ordered chain of transformers over the concatenated result.
///
/// Every loader runs to completion before the next starts, and every
/// transformer receives the full output of the one before it — no
/// concurrency, unlike a fan-out indexing pipeline, because spec.md §4.2.6
/// requires strict ordering and per-stage error attribution: a failure is
/// tagged with which stage (loader or transformer) and which index within
/// that stage produced it, via [`RagKitError::at_pipeline_stage`].
pub struct LoaderPipeline {
    loaders: Vec<Arc<dyn Loader>>,
    transformers: Vec<Arc<dyn Transformer>>,
}

impl LoaderPipeline {
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
            transformers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_loader(mut self, loader: Arc<dyn Loader>) -> Self {
        self.loaders.push(loader);
        self
    }

    #[must_use]
    pub fn with_transformer(mut self, transformer: Arc<dyn Transformer>) -> Self {
        self.transformers.push(transformer);
        self
    }

    /// Loads `sources` through every loader in turn (each source is passed
    /// to every loader; a loader for which a source makes no sense should
    /// simply return an empty result rather than erroring) and then runs the
    /// transformer chain over the combined output.
    pub async fn run(&self, sources: &[String]) -> Result<Vec<Document>, RagKitError> {
        let mut documents = Vec::new();
        for (index, loader) in self.loaders.iter().enumerate() {
            for source in sources {
                let loaded = loader
                    .load(source)
                    .await
                    .map_err(|e| e.at_pipeline_stage("loader", index))?;
                documents.extend(loaded);
            }
        }

        for (index, transformer) in self.transformers.iter().enumerate() {
            documents = transformer
                .transform(documents)
                .await
                .map_err(|e| e.at_pipeline_stage("transformer", index))?;
        }

        Ok(documents)
    }
}

impl Default for LoaderPipeline {
    fn default() -> Self {
        Self::new()
    }
}
