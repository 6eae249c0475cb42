use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A video record as held by the metadata store.
///
/// The ingestion pipeline only rewrites `thumbnail_url` and `video_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Build a new draft record with no assets attached.
    pub fn new_draft(user_id: Uuid, title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            description,
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateVideoRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_has_no_assets() {
        let owner = Uuid::new_v4();
        let video = Video::new_draft(owner, "Boots".to_string(), String::new());
        assert!(video.thumbnail_url.is_none());
        assert!(video.video_url.is_none());
        assert!(video.is_owned_by(owner));
        assert!(!video.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_serializes_snake_case_fields() {
        let video = Video::new_draft(Uuid::new_v4(), "t".to_string(), "d".to_string());
        let json = serde_json::to_value(&video).unwrap();
        assert!(json.get("user_id").is_some());
        assert!(json.get("thumbnail_url").unwrap().is_null());
        assert!(json.get("video_url").unwrap().is_null());
    }

    #[test]
    fn test_create_request_validation() {
        let ok = CreateVideoRequest {
            title: "A title".to_string(),
            description: String::new(),
        };
        assert!(ok.validate().is_ok());

        let empty = CreateVideoRequest {
            title: String::new(),
            description: String::new(),
        };
        assert!(empty.validate().is_err());
    }
}
