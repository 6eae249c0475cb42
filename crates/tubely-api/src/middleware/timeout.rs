use crate::error::ErrorResponse;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;

/// Request deadline middleware
/// Dropping the inner future on expiry cancels the handler, which kills any running
/// media tool and removes staging files through their drop guards.
pub async fn request_timeout_middleware(
    State(timeout): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                method = %method,
                path = %path,
                timeout_secs = timeout.as_secs(),
                "Request exceeded deadline"
            );
            (
                StatusCode::REQUEST_TIMEOUT,
                Json(ErrorResponse {
                    error: "Request timed out".to_string(),
                    details: None,
                    error_type: None,
                    code: "REQUEST_TIMEOUT".to_string(),
                    recoverable: true,
                    suggested_action: Some("Retry with a smaller upload".to_string()),
                }),
            )
                .into_response()
        }
    }
}
