use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tubely_core::models::Video;
use tubely_core::AppError;
use uuid::Uuid;

use super::videos::VideoRepository;

/// Process-local video store for tests and local experiments.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<Uuid, Video>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `change` to one record under the write lock and return the result.
    async fn modify(&self, id: Uuid, change: impl FnOnce(&mut Video)) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        let video = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;
        change(video);
        video.updated_at = Utc::now();
        Ok(video.clone())
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&video.id) {
            return Err(AppError::BadRequest(format!(
                "Video {} already exists",
                video.id
            )));
        }
        videos.insert(video.id, video.clone());
        Ok(video.clone())
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn set_thumbnail_url(&self, id: Uuid, url: &str) -> Result<Video, AppError> {
        self.modify(id, |video| video.thumbnail_url = Some(url.to_string()))
            .await
    }

    async fn set_video_url(&self, id: Uuid, url: &str) -> Result<Video, AppError> {
        self.modify(id, |video| video.video_url = Some(url.to_string()))
            .await
    }

    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let mut videos: Vec<Video> = self
            .videos
            .read()
            .await
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryVideoRepository::new();
        let video = Video::new_draft(Uuid::new_v4(), "Boots".to_string(), String::new());
        repo.create_video(&video).await.unwrap();

        let fetched = repo.get_video(video.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Boots");
        assert!(repo.get_video(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_url_only_touches_existing_records() {
        let repo = InMemoryVideoRepository::new();
        let video = Video::new_draft(Uuid::new_v4(), "Boots".to_string(), String::new());
        repo.create_video(&video).await.unwrap();

        let url = "https://cdn.example.com/landscape/abc.mp4";
        let updated = repo.set_video_url(video.id, url).await.unwrap();
        assert_eq!(updated.video_url.as_deref(), Some(url));
        let fetched = repo.get_video(video.id).await.unwrap().unwrap();
        assert_eq!(fetched.video_url.as_deref(), Some(url));

        let err = repo.set_video_url(Uuid::new_v4(), url).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_url_setters_do_not_clobber_each_other() {
        let repo = InMemoryVideoRepository::new();
        let video = Video::new_draft(Uuid::new_v4(), "Boots".to_string(), String::new());
        repo.create_video(&video).await.unwrap();

        repo.set_thumbnail_url(video.id, "http://localhost:8091/assets/a.png")
            .await
            .unwrap();
        let updated = repo
            .set_video_url(video.id, "http://localhost:8091/media/landscape/b.mp4")
            .await
            .unwrap();

        assert_eq!(
            updated.thumbnail_url.as_deref(),
            Some("http://localhost:8091/assets/a.png")
        );
        assert_eq!(
            updated.video_url.as_deref(),
            Some("http://localhost:8091/media/landscape/b.mp4")
        );
        assert_eq!(updated.title, "Boots");
    }

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let repo = InMemoryVideoRepository::new();
        let owner = Uuid::new_v4();
        repo.create_video(&Video::new_draft(owner, "a".to_string(), String::new()))
            .await
            .unwrap();
        repo.create_video(&Video::new_draft(owner, "b".to_string(), String::new()))
            .await
            .unwrap();
        repo.create_video(&Video::new_draft(Uuid::new_v4(), "c".to_string(), String::new()))
            .await
            .unwrap();

        assert_eq!(repo.list_videos_for_user(owner).await.unwrap().len(), 2);
    }
}
