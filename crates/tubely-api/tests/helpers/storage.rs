//! Storage fake whose writes always fail, like an unreachable bucket.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tubely_storage::{Storage, StorageBackend, StorageError, StorageResult};

#[derive(Default)]
pub struct FailingStorage {
    upload_attempts: AtomicUsize,
}

impl FailingStorage {
    pub fn upload_attempts(&self) -> usize {
        self.upload_attempts.load(Ordering::SeqCst)
    }

    fn reject(&self) -> StorageError {
        self.upload_attempts.fetch_add(1, Ordering::SeqCst);
        StorageError::UploadFailed("connection reset by peer".to_string())
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn upload_with_key(
        &self,
        _storage_key: &str,
        _data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<String> {
        Err(self.reject())
    }

    async fn upload_file(
        &self,
        _storage_key: &str,
        source: &Path,
        _content_type: &str,
    ) -> StorageResult<String> {
        assert!(source.exists(), "upload_file called on a missing file");
        Err(self.reject())
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        Err(StorageError::NotFound(storage_key.to_string()))
    }

    async fn delete(&self, _storage_key: &str) -> StorageResult<()> {
        Ok(())
    }

    async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("http://unreachable.invalid/{}", storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
