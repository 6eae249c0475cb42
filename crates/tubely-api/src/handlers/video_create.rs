use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::DbState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tubely_core::models::{CreateVideoRequest, Video};

/// Create a draft video record owned by the caller. Assets are attached afterwards
/// through the thumbnail and video upload endpoints.
#[utoipa::path(
    post,
    path = "/api/v0/videos",
    tag = "videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Draft video created", body = Video),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(db, request), fields(user_id = %user.user_id, operation = "create_video"))]
pub async fn create_video(
    State(db): State<DbState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateVideoRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let draft = Video::new_draft(user.user_id, request.title, request.description);
    let video = db.videos.create_video(&draft).await?;

    tracing::info!(video_id = %video.id, "Draft video created");
    Ok((StatusCode::CREATED, Json(video)))
}
