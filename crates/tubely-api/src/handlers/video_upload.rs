use crate::auth::AuthUser;
use crate::constants::VIDEO_FIELD;
use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::VideoIdPath;
use crate::services::AssetIngestService;
use crate::state::AppState;
use crate::utils::upload::stage_video_field;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tubely_core::models::Video;
use tubely_core::AppError;

/// Upload the video file of a record. The file is classified by aspect ratio,
/// rewritten for fast start and stored before the record is updated, all within
/// this request; 202 signals that the asset is stored.
#[utoipa::path(
    post,
    path = "/api/v0/videos/{video_id}/video",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Field `video` with a video/mp4 part"),
    responses(
        (status = 202, description = "Video stored and attached", body = Video),
        (status = 400, description = "Malformed ID, missing field or wrong media type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "Video too large", body = ErrorResponse),
        (status = 500, description = "Inspection, transcoding or storage failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(video_id = %video_id, user_id = %user.user_id, operation = "upload_video")
)]
pub async fn upload_video(
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

    let limits = &state.media.limits;
    let staged = stage_video_field(
        &mut multipart,
        VIDEO_FIELD,
        &limits.staging_dir,
        limits.max_video_size,
    )
    .await?;

    // `staged` lives until the end of this scope and deletes its file on drop.
    let video = service.attach_video(video, staged.path()).await?;
    Ok((StatusCode::ACCEPTED, Json(video)))
}
