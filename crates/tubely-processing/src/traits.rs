//! Core traits for media inspection and transcoding
//!
//! Both traits operate on paths of staged files so that the external tools can
//! seek freely. Tests substitute in-memory implementations.

use std::path::Path;

use async_trait::async_trait;

use crate::error::MediaError;

/// Dimensions and identity of one stream reported by the inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub index: u32,
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl StreamInfo {
    pub fn video(width: u32, height: u32) -> Self {
        Self {
            index: 0,
            codec_type: Some("video".to_string()),
            codec_name: None,
            width,
            height,
        }
    }
}

/// Reports the video streams of a media file.
#[async_trait]
pub trait MediaInspector: Send + Sync {
    /// Streams in the order the container lists them. An empty result is an
    /// error, never `Ok(vec![])`.
    async fn inspect(&self, path: &Path) -> Result<Vec<StreamInfo>, MediaError>;
}

/// Rewrites an MP4 with its metadata atom moved to the front.
#[async_trait]
pub trait FastStartTranscoder: Send + Sync {
    /// Stream data is copied, never re-encoded. `output` must not be `input`.
    async fn fast_start(&self, input: &Path, output: &Path) -> Result<(), MediaError>;
}
