//! Asset ingestion pipeline
//!
//! Thumbnails: validate → persist to the assets directory → update record.
//! Videos: inspect → classify → fast-start rewrite (optional) → upload → update record.
//!
//! A record's URL fields are only written after the bytes are durably stored, and each
//! pipeline writes only the column it owns, so a thumbnail and a video landing at the
//! same time do not undo each other. If the record update itself fails, the freshly
//! written blob is deleted again before the error is returned.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tubely_core::constants::VIDEO_CONTENT_TYPE;
use tubely_core::models::Video;
use tubely_core::AppError;
use tubely_processing::{fast_start_output_path, AspectRatio, MediaError};
use tubely_storage::keys::{thumbnail_filename, video_key};
use tubely_storage::{Storage, StorageResult};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::upload::ThumbnailUpload;

/// Removes the fast-start output file when dropped.
struct ProcessingFile {
    path: PathBuf,
}

impl ProcessingFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProcessingFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                error = %e,
                path = %self.path.display(),
                "Failed to remove processing file"
            ),
        }
    }
}

fn media_error(err: MediaError) -> AppError {
    AppError::MediaProcessing(err.to_string())
}

async fn with_storage_deadline<T>(
    timeout: Duration,
    operation: &str,
    fut: impl Future<Output = StorageResult<T>>,
) -> Result<T, AppError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(AppError::Storage(format!("Failed to {}: {}", operation, e))),
        Err(_) => Err(AppError::Storage(format!(
            "Timed out after {}s trying to {}",
            timeout.as_secs(),
            operation
        ))),
    }
}

pub struct AssetIngestService {
    state: Arc<AppState>,
}

impl AssetIngestService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Load a video record and check that `user_id` owns it.
    pub async fn authorize(&self, video_id: Uuid, user_id: Uuid) -> Result<Video, AppError> {
        let video = self
            .state
            .db
            .videos
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

        if !video.is_owned_by(user_id) {
            tracing::warn!(
                video_id = %video_id,
                user_id = %user_id,
                "Rejected asset change by non-owner"
            );
            return Err(AppError::Forbidden(
                "You are not the owner of this video".to_string(),
            ));
        }

        Ok(video)
    }

    /// Persist thumbnail bytes under a random name and point the record at them.
    pub async fn attach_thumbnail(
        &self,
        video: Video,
        upload: ThumbnailUpload,
    ) -> Result<Video, AppError> {
        let storage = self.state.media.asset_storage.clone();
        let filename = thumbnail_filename(upload.extension);
        let size_bytes = upload.data.len();

        let url = with_storage_deadline(
            self.state.media.limits.storage_timeout,
            "store thumbnail",
            storage.upload_with_key(&filename, upload.data, &upload.content_type),
        )
        .await?;

        tracing::info!(
            video_id = %video.id,
            key = %filename,
            size_bytes,
            "Thumbnail stored"
        );

        let videos = &self.state.db.videos;
        self.commit(
            videos.set_thumbnail_url(video.id, &url),
            video.id,
            storage.as_ref(),
            &filename,
        )
        .await
    }

    /// Classify, optionally rewrite and upload a staged video, then point the record at it.
    ///
    /// The staged file itself is owned by the caller; only the fast-start output is
    /// cleaned up here.
    pub async fn attach_video(&self, video: Video, staged: &Path) -> Result<Video, AppError> {
        let media = &self.state.media;
        let started = Instant::now();

        let streams = media.inspector.inspect(staged).await.map_err(media_error)?;
        let aspect = AspectRatio::from_streams(&streams).map_err(media_error)?;
        tracing::debug!(video_id = %video.id, aspect = %aspect, "Video classified");

        let processed = if media.limits.faststart_enabled {
            let output = ProcessingFile::new(fast_start_output_path(staged));
            media
                .transcoder
                .fast_start(staged, output.path())
                .await
                .map_err(media_error)?;
            Some(output)
        } else {
            None
        };
        let upload_path = processed.as_ref().map(|p| p.path()).unwrap_or(staged);

        let key = video_key(aspect.key_prefix());
        let storage = media.video_storage.clone();
        let url = with_storage_deadline(
            media.limits.storage_timeout,
            "upload video",
            storage.upload_file(&key, upload_path, VIDEO_CONTENT_TYPE),
        )
        .await?;

        tracing::info!(
            video_id = %video.id,
            key = %key,
            aspect = %aspect,
            duration_ms = started.elapsed().as_millis() as u64,
            "Video stored"
        );

        let videos = &self.state.db.videos;
        self.commit(
            videos.set_video_url(video.id, &url),
            video.id,
            storage.as_ref(),
            &key,
        )
        .await
    }

    /// Run the single-column record update; on failure delete the blob that was just
    /// stored.
    async fn commit(
        &self,
        update: impl Future<Output = Result<Video, AppError>>,
        video_id: Uuid,
        storage: &dyn Storage,
        key: &str,
    ) -> Result<Video, AppError> {
        match update.await {
            Ok(video) => Ok(video),
            Err(update_err) => {
                tracing::error!(
                    error = %update_err,
                    video_id = %video_id,
                    key = %key,
                    "Record update failed, removing stored object"
                );
                if let Err(cleanup_err) = with_storage_deadline(
                    self.state.media.limits.storage_timeout,
                    "delete orphaned object",
                    storage.delete(key),
                )
                .await
                {
                    tracing::error!(
                        error = %cleanup_err,
                        key = %key,
                        "Failed to remove object after record update failure"
                    );
                }
                Err(update_err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4.processing");
        std::fs::write(&path, b"moov").unwrap();
        {
            let _guard = ProcessingFile::new(path.clone());
        }
        assert!(!path.exists());

        // A file that was never created is not an error.
        drop(ProcessingFile::new(dir.path().join("missing.processing")));
    }

    #[tokio::test]
    async fn test_storage_deadline_elapses() {
        let result: Result<(), AppError> = with_storage_deadline(
            Duration::from_millis(10),
            "upload video",
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
        )
        .await;
        match result {
            Err(AppError::Storage(msg)) => assert!(msg.contains("Timed out")),
            other => panic!("Expected Storage error, got {:?}", other),
        }
    }
}
