//! Tubely Storage Library
//!
//! Storage abstraction and implementations for video objects and thumbnail
//! assets. It includes the `Storage` trait plus S3 and local filesystem backends.
//!
//! # Key format
//!
//! - **Videos**: `{aspect_prefix}/{token}.mp4`, e.g. `landscape/3q2-...x8.mp4`
//! - **Thumbnails**: `{token}.{ext}` directly under the assets root
//!
//! `token` is 32 random bytes encoded as unpadded URL-safe base64. Keys must not
//! contain `..` or a leading `/`. Key generation lives in the `keys` module so
//! every backend stays consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_storage, StorageSettings};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
