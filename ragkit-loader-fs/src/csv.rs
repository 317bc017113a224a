use crate::text::basename;
use async_trait::async_trait;
use ragkit_core::document::keys;
use ragkit_core::{Document, RagKitError};
use ragkit_provider::Loader;

/// Loads a CSV file, emitting one document per data row (spec.md §4.2.3).
pub struct CsvLoader {
    /// Header names whose cells form `content`, joined `"<header>: <value>"`
    /// per line in the given order. Empty means "every column".
    pub content_columns: Vec<String>,
}

impl CsvLoader {
    pub fn new() -> Self {
        Self { content_columns: Vec::new() }
    }

    #[must_use]
    pub fn with_content_columns(mut self, columns: Vec<String>) -> Self {
        self.content_columns = columns;
        self
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn render_content(headers: &[String], record: &[String], columns: &[String]) -> String {
    if columns.is_empty() {
        headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| format!("{h}: {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        let present: Vec<String> = columns
            .iter()
            .filter(|c| {
                let found = headers.contains(c);
                if !found {
                    log::warn!("configured content column '{c}' not found in CSV headers {headers:?}");
                }
                found
            })
            .cloned()
            .collect();
        present
            .iter()
            .filter_map(|wanted| {
                headers
                    .iter()
                    .position(|h| h == wanted)
                    .and_then(|idx| record.get(idx).map(|v| format!("{wanted}: {v}")))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl Loader for CsvLoader {
    async fn load(&self, source: &str) -> Result<Vec<Document>, RagKitError> {
        let bytes = tokio::fs::read(source)
            .await
            .map_err(|e| RagKitError::load(source, e.to_string()))?;

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes.as_slice());
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| RagKitError::load(source, format!("csv parse error: {e}")))?
            .iter()
            .map(|s| s.to_string())
            .collect();

        let name = basename(source);
        let mut documents = Vec::new();
        for (row_index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| RagKitError::load(source, format!("csv parse error: {e}")))?;
            let cells: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            let content = render_content(&headers, &cells, &self.content_columns);

            let mut document = Document::new(format!("{source}#{row_index}"), content)
                .with_meta(keys::SOURCE, source)
                .with_meta(keys::FORMAT, "csv")
                .with_meta(keys::NAME, name.clone())
                .with_meta("row", row_index as u64);
            for (header, cell) in headers.iter().zip(cells.iter()) {
                document = document.with_meta(header.clone(), cell.clone());
            }
            documents.push(document);
        }

        Ok(documents)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
