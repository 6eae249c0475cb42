//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::{create_storage, Storage, StorageSettings};

/// Durable targets of the ingestion pipeline.
pub struct Stores {
    pub videos: Arc<dyn Storage>,
    pub assets: Arc<dyn Storage>,
}

/// Build the video object store and the local thumbnail assets store.
pub async fn setup_storage(config: &Config) -> Result<Stores> {
    tracing::info!("Initializing storage...");

    let videos = create_storage(&StorageSettings::videos(config))
        .await
        .context("Failed to initialize video storage")?;
    let assets = create_storage(&StorageSettings::assets(config))
        .await
        .context("Failed to initialize assets storage")?;

    tracing::info!(
        video_backend = %videos.backend_type(),
        assets_root = %config.assets_root(),
        "Storage initialized successfully"
    );

    Ok(Stores { videos, assets })
}
