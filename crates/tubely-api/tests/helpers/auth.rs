use tubely_api::auth::JwtAuthenticator;
use uuid::Uuid;

/// Test JWT secret (must match the config built by setup_test_app).
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

/// Issue a one-hour access token for `user_id`.
pub fn token_for(user_id: Uuid) -> String {
    JwtAuthenticator::new(TEST_JWT_SECRET)
        .issue_token(user_id, chrono::Duration::hours(1))
        .expect("Failed to issue test token")
}

/// `Authorization` header value for `user_id`.
pub fn bearer(user_id: Uuid) -> String {
    format!("Bearer {}", token_for(user_id))
}
