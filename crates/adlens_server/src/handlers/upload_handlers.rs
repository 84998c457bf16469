use adlens_core::analyze_bytes;
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};

use crate::error::{ApiError, ApiResult};
use crate::models::UploadResponse;
use crate::state::ServerState;
use crate::upload::{accept_file_name, store_upload};

/// Multipart field carrying the report
pub const FILE_FIELD: &str = "file";

// ============================================================================
// Upload Handlers
// ============================================================================

pub async fn upload_file(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let raw_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        upload = Some((raw_name, bytes));
        break;
    }

    let (raw_name, bytes) = upload.ok_or(ApiError::MissingFile)?;
    let file_name = accept_file_name(raw_name.as_deref())?;
    store_upload(&state.upload_dir, &file_name, &bytes).await?;

    let name = file_name.clone();
    let analysis = tokio::task::spawn_blocking(move || analyze_bytes(&name, bytes.to_vec()))
        .await?
        .inspect_err(|e| tracing::warn!(file = %file_name, error = ?e, "Analysis failed"))?;

    let session = state.sessions.insert(analysis)?;
    tracing::info!(
        session = %session.id,
        file = %file_name,
        products = session.analysis.product_count(),
        "Created session"
    );

    Ok((StatusCode::CREATED, Json(UploadResponse::new(&session))))
}
