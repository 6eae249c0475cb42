//! Assemble repositories, stores, media tools and the authenticator into `AppState`.

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tubely_core::Config;
use tubely_db::PgVideoRepository;
use tubely_processing::{FfmpegFastStart, FfprobeInspector};

use super::storage::Stores;
use crate::auth::JwtAuthenticator;
use crate::state::{AppState, DbState, IngestLimits, MediaState};

pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    stores: Stores,
) -> Result<Arc<AppState>> {
    let tool_timeout = Duration::from_secs(config.media_tool_timeout_secs());
    let inspector = FfprobeInspector::new(config.ffprobe_path().to_string(), tool_timeout)
        .context("Invalid FFPROBE_PATH")?;
    let transcoder = FfmpegFastStart::new(config.ffmpeg_path().to_string(), tool_timeout)
        .context("Invalid FFMPEG_PATH")?;

    let limits = IngestLimits::from_config(config);
    tracing::info!(
        max_thumbnail_size_bytes = limits.max_thumbnail_size,
        max_video_size_bytes = limits.max_video_size,
        faststart_enabled = limits.faststart_enabled,
        media_tool_timeout_secs = config.media_tool_timeout_secs(),
        storage_timeout_secs = config.storage_timeout_secs(),
        "Ingestion pipeline configured"
    );

    Ok(Arc::new(AppState {
        config: config.clone(),
        db: DbState {
            videos: Arc::new(PgVideoRepository::new(pool)),
        },
        media: MediaState {
            video_storage: stores.videos,
            asset_storage: stores.assets,
            inspector: Arc::new(inspector),
            transcoder: Arc::new(transcoder),
            limits,
        },
        auth: Arc::new(JwtAuthenticator::new(config.jwt_secret())),
    }))
}
