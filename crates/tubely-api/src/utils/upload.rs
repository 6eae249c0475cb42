//! Multipart helpers for the upload handlers
//!
//! Each helper looks for exactly one named field, checks its declared content type,
//! then reads its body under a size cap. Thumbnails are buffered in memory; videos are
//! streamed chunk by chunk into a staging file on disk.

use crate::constants::{THUMBNAIL_CONTENT_TYPES, VIDEO_CONTENT_TYPE, VIDEO_EXTENSION};
use crate::error::HttpAppError;
use axum::extract::multipart::Field;
use axum::extract::Multipart;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tubely_core::AppError;

/// Normalize MIME type by stripping parameters and case (e.g. "Image/JPEG; q=1" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// File extension for an allowed thumbnail type, `None` for anything else.
pub fn thumbnail_extension(content_type: &str) -> Option<&'static str> {
    match normalize_mime_type(content_type).as_str() {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpeg"),
        _ => None,
    }
}

fn declared_content_type(field: &Field<'_>, field_name: &str) -> Result<String, AppError> {
    field
        .content_type()
        .map(normalize_mime_type)
        .filter(|ct| !ct.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing content type for '{}'", field_name)))
}

fn too_large(max_size: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "File size exceeds maximum allowed size of {} bytes",
        max_size
    ))
}

fn missing_field(field_name: &str) -> HttpAppError {
    HttpAppError(AppError::BadRequest(format!(
        "Missing form field '{}'",
        field_name
    )))
}

/// A thumbnail read fully into memory.
#[derive(Debug)]
pub struct ThumbnailUpload {
    pub content_type: String,
    pub extension: &'static str,
    pub data: Vec<u8>,
}

/// Read the thumbnail field, rejecting disallowed types before any byte is buffered.
pub async fn read_thumbnail_field(
    multipart: &mut Multipart,
    field_name: &str,
    max_size: usize,
) -> Result<ThumbnailUpload, HttpAppError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = declared_content_type(&field, field_name)?;
        let extension = thumbnail_extension(&content_type).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unsupported thumbnail content type '{}'. Allowed types: {}",
                content_type,
                THUMBNAIL_CONTENT_TYPES.join(", ")
            ))
        })?;

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if data.len() + chunk.len() > max_size {
                return Err(too_large(max_size).into());
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(ThumbnailUpload {
            content_type,
            extension,
            data,
        });
    }

    Err(missing_field(field_name))
}

/// Stream the video field into a staging file under `staging_dir`.
///
/// The returned file is deleted when dropped, so every exit path of the caller
/// cleans it up.
pub async fn stage_video_field(
    multipart: &mut Multipart,
    field_name: &str,
    staging_dir: &Path,
    max_size: usize,
) -> Result<NamedTempFile, HttpAppError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = declared_content_type(&field, field_name)?;
        if content_type != VIDEO_CONTENT_TYPE {
            return Err(AppError::BadRequest(format!(
                "Unsupported video content type '{}'. Only {} is accepted",
                content_type, VIDEO_CONTENT_TYPE
            ))
            .into());
        }

        let staged = tempfile::Builder::new()
            .prefix("tubely-upload-")
            .suffix(&format!(".{}", VIDEO_EXTENSION))
            .tempfile_in(staging_dir)
            .map_err(AppError::from)?;
        let handle = staged.as_file().try_clone().map_err(AppError::from)?;
        let mut file = tokio::fs::File::from_std(handle);

        let mut written = 0usize;
        while let Some(chunk) = field.chunk().await? {
            written += chunk.len();
            if written > max_size {
                return Err(too_large(max_size).into());
            }
            file.write_all(&chunk).await.map_err(AppError::from)?;
        }
        file.flush().await.map_err(AppError::from)?;
        file.sync_all().await.map_err(AppError::from)?;

        tracing::debug!(
            path = %staged.path().display(),
            size_bytes = written,
            "Video staged for processing"
        );
        return Ok(staged);
    }

    Err(missing_field(field_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mime_type() {
        assert_eq!(normalize_mime_type("image/png"), "image/png");
        assert_eq!(normalize_mime_type(" Image/JPEG ; charset=utf-8"), "image/jpeg");
        assert_eq!(normalize_mime_type("video/mp4;codecs=avc1"), "video/mp4");
        assert_eq!(normalize_mime_type(""), "");
    }

    #[test]
    fn test_thumbnail_extension() {
        assert_eq!(thumbnail_extension("image/png"), Some("png"));
        assert_eq!(thumbnail_extension("image/jpeg; q=0.9"), Some("jpeg"));
        assert_eq!(thumbnail_extension("image/gif"), None);
        assert_eq!(thumbnail_extension("image/jpg"), None);
        assert_eq!(thumbnail_extension("application/octet-stream"), None);
    }
}
