//! Upload echo handler

use axum::body::Bytes;
use axum::extract::{Multipart, State};

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field name the forwarding client puts the file under
pub const UPLOAD_FIELD: &str = "qqfile";

/// Sentinel written to the console before and after the echoed file
pub const FILE_MARKER: &str = "-------- the file ----------------------";

/// Handle a forwarded upload: echo the file field (if any) to the console
/// between marker lines and reply with a fixed success body.
///
/// The marker pair is written even when no file field is present. The
/// upload is per-request; nothing is kept once the response is sent.
pub async fn receive_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<&'static str, ApiError> {
    let mut content: Option<Bytes> = None;

    // Zero or one upload per request; first match wins.
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to parse multipart data: {}", e)))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let filename = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

            tracing::info!(size = bytes.len(), filename = ?filename, "Received upload");
            content = Some(bytes);
            break;
        }
    }

    if content.is_none() {
        tracing::debug!("No '{}' field in request", UPLOAD_FIELD);
    }

    let sink = state.sink();
    sink.line(FILE_MARKER)?;
    if let Some(bytes) = &content {
        sink.raw(bytes)?;
    }
    sink.line(FILE_MARKER)?;

    Ok("It works!")
}
