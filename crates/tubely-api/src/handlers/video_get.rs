use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::VideoIdPath;
use crate::state::DbState;
use axum::{extract::State, response::IntoResponse, Json};
use tubely_core::models::Video;
use tubely_core::AppError;

#[utoipa::path(
    get,
    path = "/api/v0/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video found", body = Video),
        (status = 400, description = "Malformed video ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(db),
    fields(video_id = %video_id, user_id = %user.user_id, operation = "get_video")
)]
pub async fn get_video(
    State(db): State<DbState>,
    VideoIdPath(video_id): VideoIdPath,
    user: AuthUser,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = db
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if !video.is_owned_by(user.user_id) {
        return Err(AppError::Forbidden("You are not the owner of this video".to_string()).into());
    }

    Ok(Json(video))
}

#[utoipa::path(
    get,
    path = "/api/v0/videos",
    tag = "videos",
    responses(
        (status = 200, description = "Videos owned by the caller, newest first", body = Vec<Video>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(db), fields(user_id = %user.user_id, operation = "list_videos"))]
pub async fn list_videos(
    State(db): State<DbState>,
    user: AuthUser,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = db.videos.list_videos_for_user(user.user_id).await?;
    Ok(Json(videos))
}
