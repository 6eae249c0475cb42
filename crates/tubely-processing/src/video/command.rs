//! Subprocess helpers shared by the ffprobe and ffmpeg wrappers.

use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;

use crate::error::MediaError;

// Longest stderr excerpt carried in an error.
const MAX_STDERR_CHARS: usize = 2000;

/// Reject configured tool paths carrying shell metacharacters, control
/// characters or traversal sequences.
pub(crate) fn validate_path(path: &str) -> Result<(), MediaError> {
    if path.trim().is_empty() {
        return Err(MediaError::InvalidPath("path is empty".to_string()));
    }

    let dangerous_chars = [';', '|', '&', '$', '`', '<', '>', '\n', '\r', '\0'];
    if path.chars().any(|c| dangerous_chars.contains(&c) || c.is_control()) {
        return Err(MediaError::InvalidPath(format!(
            "path contains dangerous characters: {}",
            path.escape_debug()
        )));
    }

    if path.contains("..") {
        return Err(MediaError::InvalidPath(format!(
            "path contains directory traversal: {}",
            path
        )));
    }

    Ok(())
}

/// Media paths are passed as discrete arguments with no shell in between, so only
/// empty paths, NUL and control characters are rejected.
pub(crate) fn validate_media_path(path: &Path) -> Result<(), MediaError> {
    let as_str = path
        .to_str()
        .ok_or_else(|| MediaError::InvalidPath("path is not valid UTF-8".to_string()))?;

    if as_str.trim().is_empty() {
        return Err(MediaError::InvalidPath("path is empty".to_string()));
    }

    if as_str.chars().any(|c| c.is_control()) {
        return Err(MediaError::InvalidPath(format!(
            "path contains control characters: {}",
            as_str.escape_debug()
        )));
    }

    Ok(())
}

/// Run `command` to completion within `timeout`.
///
/// The child is killed if the deadline passes or the calling future is dropped.
pub(crate) async fn run_tool(
    tool: &'static str,
    mut command: Command,
    timeout: Duration,
) -> Result<Output, MediaError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = command
        .spawn()
        .map_err(|source| MediaError::Spawn { tool, source })?;

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| MediaError::Timeout {
            tool,
            seconds: timeout.as_secs(),
        })?
        .map_err(|source| MediaError::Spawn { tool, source })?;

    if !output.status.success() {
        let stderr: String = String::from_utf8_lossy(&output.stderr)
            .chars()
            .take(MAX_STDERR_CHARS)
            .collect();
        return Err(MediaError::Failed {
            tool,
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(output)
}
