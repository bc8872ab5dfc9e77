use std::path::Path;

use async_trait::async_trait;

use crate::document::{DocumentParser, ParseError, ParsedDocument};

/// In-process PDF text extraction via `pdf-extract`. No network, no credentials.
pub struct LocalPdfParser;

#[async_trait]
impl DocumentParser for LocalPdfParser {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn parse(&self, path: &Path) -> Result<Vec<ParsedDocument>, ParseError> {
        let path = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
            .await
            .map_err(|e| ParseError::Extraction(e.to_string()))?
            .map_err(|e| ParseError::Extraction(e.to_string()))?;
        Ok(vec![ParsedDocument { text }])
    }
}
