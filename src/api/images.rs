//! Compression preview for admin uploads.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::auth::{AdminError, AdminSession};
use crate::errors::AppError;
use crate::forms::InboundForm;
use crate::imaging::{format_file_size, ImageSlot};
use crate::AppState;

pub const ORIGINAL_SIZE_HEADER: &str = "x-original-size";
pub const COMPRESSED_SIZE_HEADER: &str = "x-compressed-size";
pub const QUALITY_HEADER: &str = "x-image-quality";
pub const DEFAULT_SIZE_HEADER: &str = "x-default-size";
pub const DEFAULT_QUALITY_HEADER: &str = "x-default-quality";

/// POST /api/admin/images/compress
///
/// Takes a `file` and an optional `quality` field. The image is first
/// compressed at the default quality, as a freshly chosen image is, then
/// re-derived from the original at the requested quality. Answers with the
/// final bytes and reports the sizes at both qualities in headers.
pub async fn compress_preview(
    State(state): State<AppState>,
    _session: AdminSession,
    multipart: Multipart,
) -> Result<Response, AdminError> {
    let form = InboundForm::read(multipart).await?;
    let Some(upload) = form.file("file") else {
        return Err(AppError::Validation("No image provided".to_string()).into());
    };
    image::guess_format(&upload.bytes).map_err(AppError::from)?;

    let settings = state.image_settings();
    let quality = form.quality("quality", &settings)?;

    let mut slot = ImageSlot::compressed(upload, settings.default_quality, settings.policy).await;
    let default_size = slot.upload().len() as u64;
    if quality != slot.quality() {
        slot.requality(quality, settings.policy).await;
    }

    let original_size = slot.original().len() as u64;
    let output = slot.upload();
    let compressed_size = output.len() as u64;

    tracing::debug!(
        quality = slot.quality().get(),
        before = %format_file_size(original_size),
        after = %format_file_size(compressed_size),
        "Compression preview"
    );

    let disposition = format!("inline; filename=\"{}\"", header_file_name(&output.file_name));
    Ok((
        [
            (header::CONTENT_TYPE.as_str(), output.content_type.clone()),
            (header::CONTENT_DISPOSITION.as_str(), disposition),
            (ORIGINAL_SIZE_HEADER, original_size.to_string()),
            (COMPRESSED_SIZE_HEADER, compressed_size.to_string()),
            (QUALITY_HEADER, slot.quality().get().to_string()),
            (DEFAULT_SIZE_HEADER, default_size.to_string()),
            (DEFAULT_QUALITY_HEADER, settings.default_quality.get().to_string()),
        ],
        output.bytes.clone(),
    )
        .into_response())
}

/// Client file name reduced to printable ASCII for a quoted header parameter.
fn header_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| (c.is_ascii_graphic() || *c == ' ') && !matches!(c, '"' | '\\'))
        .collect();
    match cleaned.trim() {
        "" => "image.jpg".to_string(),
        trimmed => trimmed.to_string(),
    }
}
