//! Fast-start rewrite with ffmpeg.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::command::{run_tool, validate_media_path, validate_path};
use crate::error::MediaError;
use crate::traits::FastStartTranscoder;

const TOOL: &str = "ffmpeg";

/// Sibling path the rewritten file is written to: `<input>.processing`.
pub fn fast_start_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".processing");
    PathBuf::from(name)
}

/// Transcoder backed by the ffmpeg binary.
pub struct FfmpegFastStart {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegFastStart {
    pub fn new(ffmpeg_path: String, timeout: Duration) -> Result<Self, MediaError> {
        validate_path(&ffmpeg_path)?;
        Ok(Self {
            ffmpeg_path,
            timeout,
        })
    }
}

#[async_trait]
impl FastStartTranscoder for FfmpegFastStart {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn fast_start(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        let start = std::time::Instant::now();
        validate_media_path(input)?;
        validate_media_path(output)?;
        if input == output {
            return Err(MediaError::InvalidPath(
                "fast-start output must differ from input".to_string(),
            ));
        }

        let mut command = Command::new(&self.ffmpeg_path);
        command
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(output);

        run_tool(TOOL, command, self.timeout).await?;

        if !tokio::fs::try_exists(output).await.unwrap_or(false) {
            return Err(MediaError::InvalidOutput {
                tool: TOOL,
                message: "ffmpeg reported success but wrote no output".to_string(),
            });
        }

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            output = %output.display(),
            "Fast-start rewrite completed"
        );

        Ok(())
    }
}
