//! Stream inspection with ffprobe.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::command::{run_tool, validate_media_path, validate_path};
use crate::error::MediaError;
use crate::traits::{MediaInspector, StreamInfo};

const TOOL: &str = "ffprobe";

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    index: u32,
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Parse `ffprobe -print_format json -show_streams` output.
pub(crate) fn parse_probe_output(stdout: &[u8]) -> Result<Vec<StreamInfo>, MediaError> {
    let output: ProbeOutput =
        serde_json::from_slice(stdout).map_err(|e| MediaError::InvalidOutput {
            tool: TOOL,
            message: e.to_string(),
        })?;

    if output.streams.is_empty() {
        return Err(MediaError::NoStreams);
    }

    output
        .streams
        .into_iter()
        .map(|stream| match (stream.width, stream.height) {
            (Some(width), Some(height)) => Ok(StreamInfo {
                index: stream.index,
                codec_type: stream.codec_type,
                codec_name: stream.codec_name,
                width,
                height,
            }),
            _ => Err(MediaError::InvalidOutput {
                tool: TOOL,
                message: format!("stream {} has no dimensions", stream.index),
            }),
        })
        .collect()
}

/// Inspector backed by the ffprobe binary.
pub struct FfprobeInspector {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeInspector {
    pub fn new(ffprobe_path: String, timeout: Duration) -> Result<Self, MediaError> {
        validate_path(&ffprobe_path)?;
        Ok(Self {
            ffprobe_path,
            timeout,
        })
    }
}

#[async_trait]
impl MediaInspector for FfprobeInspector {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn inspect(&self, path: &Path) -> Result<Vec<StreamInfo>, MediaError> {
        let start = std::time::Instant::now();
        validate_media_path(path)?;

        // Only video streams are listed, so the first entry is the first video stream.
        let mut command = Command::new(&self.ffprobe_path);
        command
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "-select_streams",
                "v",
            ])
            .arg(path);

        let output = run_tool(TOOL, command, self.timeout).await?;
        let streams = parse_probe_output(&output.stdout)?;

        if let Some(first) = streams.first() {
            tracing::info!(
                duration_ms = start.elapsed().as_millis(),
                stream_count = streams.len(),
                width = first.width,
                height = first.height,
                "Video probe completed"
            );
        }

        Ok(streams)
    }
}
