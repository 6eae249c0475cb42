use crate::auth::AuthUser;
use crate::constants::THUMBNAIL_FIELD;
use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::VideoIdPath;
use crate::services::AssetIngestService;
use crate::state::AppState;
use crate::utils::upload::read_thumbnail_field;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tubely_core::models::Video;
use tubely_core::AppError;

#[utoipa::path(
    post,
    path = "/api/v0/videos/{video_id}/thumbnail",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Field `thumbnail` with an image/png or image/jpeg part"),
    responses(
        (status = 200, description = "Thumbnail stored and attached", body = Video),
        (status = 400, description = "Malformed ID, missing field or disallowed type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "Thumbnail too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(video_id = %video_id, user_id = %user.user_id, operation = "upload_thumbnail")
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    VideoIdPath(video_id): VideoIdPath,
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = AssetIngestService::new(&state);
    let video = service.authorize(video_id, user.user_id).await?;
    let mut multipart = multipart.map_err(|e| {
        AppError::BadRequest(format!("Expected multipart form data: {}", e.body_text()))
    })?;

    let upload = read_thumbnail_field(
        &mut multipart,
        THUMBNAIL_FIELD,
        state.media.limits.max_thumbnail_size,
    )
    .await?;

    let video = service.attach_thumbnail(video, upload).await?;
    Ok(Json(video))
}
