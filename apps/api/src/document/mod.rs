//! Document Text Extractor: turns an uploaded PDF into resume text.
//!
//! Parsing itself is delegated to a pluggable `DocumentParser`:
//! `LlamaParseClient` (remote service, default) or `LocalPdfParser`
//! (`pdf-extract`, opt-in via `DOCUMENT_PARSER=local`).
//!
//! `AppState` holds an `Arc<dyn DocumentParser>`, chosen at startup via config.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Config, ParserBackend};

pub mod extractor;
pub mod handlers;
pub mod llama_parse;
pub mod local;
pub mod sections;
pub mod upload;

/// One document returned by a parser. Parsers may split a file into several.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub text: String,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parser API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse job {job_id} finished with status {status}")]
    JobFailed { job_id: String, status: String },

    #[error("Parse job {job_id} did not finish within {max_wait:?}")]
    Timeout { job_id: String, max_wait: Duration },

    #[error("Parse job {job_id} returned no {result_type} result")]
    MissingResult { job_id: String, result_type: String },

    #[error("Text extraction failed: {0}")]
    Extraction(String),
}

/// The document parser trait. Implement this to swap backends without
/// touching the extractor or handlers.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Parses the PDF at `path` into an ordered list of documents.
    async fn parse(&self, path: &Path) -> Result<Vec<ParsedDocument>, ParseError>;
}

/// Builds the parser selected by `config.parser`.
pub fn build_parser(config: &Config) -> Result<Arc<dyn DocumentParser>, ParseError> {
    let parser: Arc<dyn DocumentParser> = match &config.parser {
        ParserBackend::LlamaParse(lp) => Arc::new(llama_parse::LlamaParseClient::new(
            lp.clone(),
            config.http_timeout,
        )?),
        ParserBackend::Local => Arc::new(local::LocalPdfParser),
    };
    Ok(parser)
}
