#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use tubely_core::Config;

/// Backend selection and connection settings for one storage instance.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub public_base_url: Option<String>,
    pub local_path: String,
    pub local_base_url: String,
}

impl StorageSettings {
    /// Settings for the video object store.
    pub fn videos(config: &Config) -> Self {
        Self {
            backend: config.storage_backend(),
            s3_bucket: config.s3_bucket().map(String::from),
            s3_region: config.s3_region().map(String::from),
            s3_endpoint: config.s3_endpoint().map(String::from),
            public_base_url: config.video_base_url().map(String::from),
            local_path: config.local_storage_path().to_string(),
            local_base_url: config
                .video_base_url()
                .unwrap_or(config.local_storage_base_url())
                .to_string(),
        }
    }

    /// Settings for the thumbnail assets directory, which is always local.
    pub fn assets(config: &Config) -> Self {
        Self {
            backend: StorageBackend::Local,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            public_base_url: None,
            local_path: config.assets_root().to_string(),
            local_base_url: config.assets_base_url().to_string(),
        }
    }
}

/// Create a storage backend based on configuration
pub async fn create_storage(settings: &StorageSettings) -> StorageResult<Arc<dyn Storage>> {
    match settings.backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = settings
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = settings.s3_region.clone().ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;

            let storage = S3Storage::new(
                bucket,
                region,
                settings.s3_endpoint.clone(),
                settings.public_base_url.clone(),
            )
            .await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let storage =
                LocalStorage::new(settings.local_path.clone(), settings.local_base_url.clone())
                    .await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
