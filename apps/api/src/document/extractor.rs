use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::document::sections::bucket_sections;
use crate::document::upload::ScopedUpload;
use crate::document::DocumentParser;
use crate::errors::AppError;
use crate::models::resume::ResumeData;

const SERVICE: &str = "Document parser";

/// Validates an upload, runs it through the configured parser and buckets the text.
#[derive(Clone)]
pub struct DocumentExtractor {
    parser: Arc<dyn DocumentParser>,
}

impl DocumentExtractor {
    pub fn new(parser: Arc<dyn DocumentParser>) -> Self {
        Self { parser }
    }

    pub async fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<ResumeData, AppError> {
        check_upload(file_name, bytes)?;

        // Removed on drop, including when parsing fails below.
        let upload = ScopedUpload::write(bytes)
            .await
            .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("storing upload")))?;

        let documents = self
            .parser
            .parse(upload.path())
            .await
            .map_err(|e| AppError::upstream(SERVICE, e.to_string()))?;

        let text = documents
            .into_iter()
            .next()
            .map(|d| d.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AppError::Validation("Could not extract text from the PDF".to_string())
            })?;

        let sections = bucket_sections(&text);
        if sections.is_empty() {
            debug!("No section headings recognised; returning full text only");
        }
        info!(
            "Parsed resume via {}: {} chars, {} sections",
            self.parser.name(),
            text.len(),
            sections.len()
        );

        Ok(ResumeData { text, sections })
    }
}

/// Local checks on an upload, run before anything is stored or sent out.
pub fn check_upload(file_name: &str, bytes: &[u8]) -> Result<(), AppError> {
    if !is_pdf_filename(file_name) {
        warn!("Rejected non-PDF upload '{file_name}'");
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    Ok(())
}

pub fn is_pdf_filename(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
