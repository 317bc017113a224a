pub mod csv;
pub mod json;
pub mod markdown;
pub mod text;

pub use crate::csv::CsvLoader;
pub use crate::json::JsonLoader;
pub use crate::markdown::MarkdownLoader;
pub use crate::text::TextLoader;

use std::sync::Arc;

/// Registers `"text"`, `"json"`, `"csv"`, and `"markdown"` into the shared
/// loader registry. Safe to call more than once — later calls simply
/// overwrite the earlier registration, per the registry's policy.
pub fn register_defaults() {
    let registry = ragkit_provider::loaders();

    registry.register("text", |_config| Ok(Arc::new(TextLoader) as Arc<dyn ragkit_provider::Loader>));

    registry.register("markdown", |_config| {
        Ok(Arc::new(MarkdownLoader) as Arc<dyn ragkit_provider::Loader>)
    });

    registry.register("json", |config| {
        let mut loader = JsonLoader::new();
        if let Some(path) = config.option_str("jq_path") {
            loader = loader.with_jq_path(path);
        }
        if let Some(key) = config.option_str("content_key") {
            loader = loader.with_content_key(key);
        }
        Ok(Arc::new(loader) as Arc<dyn ragkit_provider::Loader>)
    });

    registry.register("csv", |config| {
        let mut loader = CsvLoader::new();
        if let Some(columns) = config.option_str("content_columns") {
            let columns = columns
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
            loader = loader.with_content_columns(columns);
        }
        Ok(Arc::new(loader) as Arc<dyn ragkit_provider::Loader>)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragkit_core::ProviderConfig;

    #[test]
    fn registers_all_four_loaders() {
        register_defaults();
        let names = ragkit_provider::loaders().list();
        for expected in ["csv", "json", "markdown", "text"] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn csv_factory_reads_content_columns_option() {
        register_defaults();
        let config = ProviderConfig::new().with_option("content_columns", "name, city");
        let instance = ragkit_provider::loaders().new_instance("csv", &config).unwrap();
        assert_eq!(instance.name(), "csv");
    }
}
