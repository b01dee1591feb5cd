//! Image upload proxy

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::media::DataUrl;
use crate::state::AppState;
use axum::{extract::State, Json};
use todo_list_shared::{UploadRequest, UploadResponse};
use tracing::info;

/// Forward a base64 data URL to the image host
///
/// POST /upload
pub async fn upload_image(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<UploadRequest>,
) -> ApiResult<Json<UploadResponse>> {
    let image = DataUrl::parse(&req.file).map_err(ApiError::Validation)?;

    let url = state.images().upload(&req.file).await?;

    metrics::counter!("todo_uploads_total").increment(1);
    info!(
        user_id = %user.id,
        mime_type = image.mime_type,
        bytes = image.byte_len,
        "Image uploaded"
    );

    Ok(Json(UploadResponse { url }))
}
