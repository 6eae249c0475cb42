use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStore, ObjectStoreExt, PutMultipartOptions,
    PutOptions, PutPayload, Result as ObjectResult, WriteMultipart,
};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

// Size of each read from the staged file while streaming a multipart upload.
const UPLOAD_CHUNK_BYTES: usize = 8 * 1024 * 1024;
// Parts allowed in flight before the reader waits.
const MAX_PARTS_IN_FLIGHT: usize = 4;

fn content_type_attributes(content_type: &str) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(
        Attribute::ContentType,
        AttributeValue::from(content_type.to_string()),
    );
    attributes
}

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    public_base_url: Option<String>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `public_base_url` - Optional base URL objects are served from (e.g. a CDN
    ///   distribution). When unset, URLs follow the bucket/region naming scheme.
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        public_base_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store: Arc::new(store),
            bucket,
            region,
            endpoint_url,
            public_base_url,
        })
    }

    #[cfg(test)]
    fn with_store(store: Arc<dyn ObjectStore>, bucket: &str) -> Self {
        S3Storage {
            store,
            bucket: bucket.to_string(),
            region: "us-east-2".to_string(),
            endpoint_url: None,
            public_base_url: None,
        }
    }

    fn generate_url(&self, key: &str) -> String {
        if let Some(ref base) = self.public_base_url {
            format!("{}/{}", base.trim_end_matches('/'), key)
        } else if let Some(ref endpoint) = self.endpoint_url {
            // Path-style addressing: {endpoint}/{bucket}/{key}
            format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }

    async fn stream_file(
        &self,
        location: &Path,
        source: &std::path::Path,
        content_type: &str,
    ) -> StorageResult<u64> {
        let mut file = tokio::fs::File::open(source).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to open {}: {}", source.display(), e))
        })?;

        let options = PutMultipartOptions {
            attributes: content_type_attributes(content_type),
            ..Default::default()
        };
        let upload = self
            .store
            .put_multipart_opts(location, options)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        let mut writer = WriteMultipart::new(upload);

        let mut buf = vec![0u8; UPLOAD_CHUNK_BYTES];
        let mut total: u64 = 0;
        loop {
            let n = match file.read(&mut buf).await {
                Ok(n) => n,
                Err(e) => {
                    let _ = writer.abort().await;
                    return Err(StorageError::UploadFailed(format!(
                        "Failed to read {}: {}",
                        source.display(),
                        e
                    )));
                }
            };
            if n == 0 {
                break;
            }
            if let Err(e) = writer.wait_for_capacity(MAX_PARTS_IN_FLIGHT).await {
                let _ = writer.abort().await;
                return Err(StorageError::UploadFailed(e.to_string()));
            }
            writer.write(&buf[..n]);
            total += n as u64;
        }

        writer
            .finish()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        Ok(total)
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String> {
        let size = data.len() as u64;
        let location = Path::from(storage_key.to_string());
        let start = std::time::Instant::now();

        let options = PutOptions {
            attributes: content_type_attributes(content_type),
            ..Default::default()
        };

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(Bytes::from(data)), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.generate_url(storage_key))
    }

    async fn upload_file(
        &self,
        storage_key: &str,
        source: &std::path::Path,
        content_type: &str,
    ) -> StorageResult<String> {
        let location = Path::from(storage_key.to_string());
        let start = std::time::Instant::now();

        let size = self
            .stream_file(&location, source, content_type)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 multipart upload failed"
                );
                e
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 multipart upload successful"
        );

        Ok(self.generate_url(storage_key))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let location = Path::from(storage_key.to_string());

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(storage_key.to_string()),
            other => StorageError::DownloadFailed(other.to_string()),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();
        let location = Path::from(storage_key.to_string());

        let result: ObjectResult<_> = self.store.delete(&location).await;

        match result {
            Ok(()) | Err(ObjectStoreError::NotFound { .. }) => {}
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                return Err(StorageError::DeleteFailed(e.to_string()));
            }
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let location = Path::from(storage_key.to_string());
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.generate_url(storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    async fn storage(endpoint: Option<&str>, public_base: Option<&str>) -> S3Storage {
        S3Storage::new(
            "tubely-videos".to_string(),
            "us-east-2".to_string(),
            endpoint.map(String::from),
            public_base.map(String::from),
        )
        .await
        .unwrap()
    }

    async fn stored_content_type(store: &InMemory, key: &str) -> Option<String> {
        let result = store.get(&Path::from(key)).await.unwrap();
        result
            .attributes
            .get(&Attribute::ContentType)
            .map(|value| AsRef::<str>::as_ref(value).to_string())
    }

    #[tokio::test]
    async fn test_upload_file_sends_content_type() {
        let store = Arc::new(InMemory::new());
        let s3 = S3Storage::with_store(store.clone(), "tubely-videos");

        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("staged.mp4");
        tokio::fs::write(&source, b"ftyp-and-mdat").await.unwrap();

        let url = s3
            .upload_file("landscape/abc.mp4", &source, "video/mp4")
            .await
            .unwrap();
        assert!(url.ends_with("/landscape/abc.mp4"));
        assert_eq!(
            stored_content_type(&store, "landscape/abc.mp4").await.as_deref(),
            Some("video/mp4")
        );
        assert_eq!(
            s3.download("landscape/abc.mp4").await.unwrap(),
            b"ftyp-and-mdat".to_vec()
        );
    }

    #[tokio::test]
    async fn test_upload_with_key_sends_content_type() {
        let store = Arc::new(InMemory::new());
        let s3 = S3Storage::with_store(store.clone(), "tubely-assets");

        s3.upload_with_key("thumb.png", vec![0x89, 0x50], "image/png")
            .await
            .unwrap();
        assert_eq!(
            stored_content_type(&store, "thumb.png").await.as_deref(),
            Some("image/png")
        );
    }

    #[tokio::test]
    async fn test_public_url_uses_bucket_region_scheme() {
        let s3 = storage(None, None).await;
        assert_eq!(
            s3.public_url("landscape/abc.mp4"),
            "https://tubely-videos.s3.us-east-2.amazonaws.com/landscape/abc.mp4"
        );
    }

    #[tokio::test]
    async fn test_public_url_prefers_configured_base() {
        let s3 = storage(Some("http://localhost:9000"), Some("https://d1234.cloudfront.net/")).await;
        assert_eq!(
            s3.public_url("portrait/abc.mp4"),
            "https://d1234.cloudfront.net/portrait/abc.mp4"
        );
    }

    #[tokio::test]
    async fn test_public_url_path_style_for_custom_endpoint() {
        let s3 = storage(Some("http://localhost:9000/"), None).await;
        assert_eq!(
            s3.public_url("other/abc.mp4"),
            "http://localhost:9000/tubely-videos/other/abc.mp4"
        );
        assert_eq!(s3.backend_type(), StorageBackend::S3);
    }
}
