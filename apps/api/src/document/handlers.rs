//! Axum route handlers for resume parsing.

use std::collections::HashMap;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::models::resume::ParseResumeResponse;
use crate::state::AppState;

/// A multipart form with one `file` part and any number of text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<(String, Bytes)>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                form.file = Some((file_name, data));
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    pub fn require_file(&mut self) -> Result<(String, Bytes), AppError> {
        self.file
            .take()
            .ok_or_else(|| AppError::Validation("Missing 'file' upload field".to_string()))
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}

/// POST /api/v1/parse-resume
///
/// Multipart upload with a `file` field holding a PDF.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let (file_name, data) = UploadForm::read(multipart).await?.require_file()?;
    let resume_data = state.extractor.extract(&file_name, &data).await?;
    Ok(Json(ParseResumeResponse::success(resume_data)))
}
