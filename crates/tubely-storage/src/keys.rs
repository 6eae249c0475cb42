//! Shared key generation for storage backends.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use tubely_core::constants::{RANDOM_TOKEN_BYTES, VIDEO_EXTENSION};

/// 32 random bytes as unpadded URL-safe base64 (43 characters).
pub fn random_token() -> String {
    let mut bytes = [0u8; RANDOM_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Object key for a video: `{prefix}/{token}.mp4`.
pub fn video_key(prefix: &str) -> String {
    format!("{}/{}.{}", prefix, random_token(), VIDEO_EXTENSION)
}

/// Flat file name for a thumbnail: `{token}.{extension}`.
pub fn thumbnail_filename(extension: &str) -> String {
    format!("{}.{}", random_token(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_token_is_url_safe() {
        let token = random_token();
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(token, random_token());
    }

    #[test]
    fn test_video_key_layout() {
        let key = video_key("portrait");
        let (prefix, file) = key.split_once('/').unwrap();
        assert_eq!(prefix, "portrait");
        assert!(file.ends_with(".mp4"));
        assert_eq!(file.len(), 43 + ".mp4".len());
    }

    #[test]
    fn test_thumbnail_filename_is_flat() {
        let name = thumbnail_filename("jpeg");
        assert!(!name.contains('/'));
        assert!(name.ends_with(".jpeg"));
    }
}
