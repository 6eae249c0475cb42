//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use tubely_core::Config;

/// Validate critical configuration values
///
/// Runs the field checks of `Config::validate` and then the checks that only matter
/// for a server deployment.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Set specific allowed origins via the CORS_ORIGINS environment variable."
        ));
    }

    if config.ffprobe_path().trim().is_empty() || config.ffmpeg_path().trim().is_empty() {
        return Err(anyhow::anyhow!("FFPROBE_PATH and FFMPEG_PATH cannot be empty"));
    }

    if config.assets_root().trim().is_empty() {
        return Err(anyhow::anyhow!("ASSETS_ROOT cannot be empty"));
    }

    if config.max_thumbnail_size_bytes() > config.max_video_size_bytes() {
        tracing::warn!(
            max_thumbnail_size_bytes = config.max_thumbnail_size_bytes(),
            max_video_size_bytes = config.max_video_size_bytes(),
            "Thumbnail limit is larger than the video limit"
        );
    }

    Ok(())
}
