//! Application state and sub-state extractors.
//!
//! AppState is split into sub-states so handlers can extract only what they need
//! via Axum's `FromRef`. Every collaborator sits behind a trait object so tests can
//! swap in in-memory or fake implementations.

use crate::auth::Authenticator;
use axum::extract::FromRef;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::{FastStartTranscoder, MediaInspector};
use tubely_storage::Storage;

/// Metadata store.
#[derive(Clone)]
pub struct DbState {
    pub videos: Arc<dyn VideoRepository>,
}

/// Per-request bounds and switches of the ingestion pipeline.
#[derive(Clone, Debug)]
pub struct IngestLimits {
    pub max_thumbnail_size: usize,
    pub max_video_size: usize,
    pub faststart_enabled: bool,
    pub storage_timeout: Duration,
    /// Directory where uploaded videos are staged before inspection.
    pub staging_dir: PathBuf,
}

impl IngestLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_thumbnail_size: config.max_thumbnail_size_bytes(),
            max_video_size: config.max_video_size_bytes(),
            faststart_enabled: config.faststart_enabled(),
            storage_timeout: Duration::from_secs(config.storage_timeout_secs()),
            staging_dir: std::env::temp_dir(),
        }
    }
}

/// Durable stores and the external media toolchain.
#[derive(Clone)]
pub struct MediaState {
    /// Object store for video files.
    pub video_storage: Arc<dyn Storage>,
    /// Local assets directory for thumbnails.
    pub asset_storage: Arc<dyn Storage>,
    pub inspector: Arc<dyn MediaInspector>,
    pub transcoder: Arc<dyn FastStartTranscoder>,
    pub limits: IngestLimits,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub media: MediaState,
    pub auth: Arc<dyn Authenticator>,
}

impl FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl FromRef<Arc<AppState>> for MediaState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.media.clone()
    }
}
