//! Fake media toolchain: no ffprobe/ffmpeg binaries are needed in tests.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tubely_processing::{FastStartTranscoder, MediaError, MediaInspector, StreamInfo};

/// Bytes the fake transcoder puts in front of the input, so tests can tell the
/// rewritten file from the original.
pub const FASTSTART_MARKER: &[u8] = b"moov-first:";

/// Reports a fixed list of streams, or fails like a crashed ffprobe.
pub struct FakeInspector {
    streams: Vec<StreamInfo>,
    fail: bool,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeInspector {
    pub fn with_streams(streams: Vec<StreamInfo>) -> Self {
        Self {
            streams,
            fail: false,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleep for `delay` before answering, like a slow probe of a large file.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing() -> Self {
        Self {
            streams: Vec::new(),
            fail: true,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaInspector for FakeInspector {
    async fn inspect(&self, path: &Path) -> Result<Vec<StreamInfo>, MediaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(path.exists(), "inspector called on a missing staging file");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(MediaError::Failed {
                tool: "ffprobe",
                status: "exit status: 1".to_string(),
                stderr: "moov atom not found".to_string(),
            });
        }
        Ok(self.streams.clone())
    }
}

/// Writes `FASTSTART_MARKER + input` to the output path.
#[derive(Default)]
pub struct FakeFastStart {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeFastStart {
    /// Leaves a truncated output file behind and then fails, like an ffmpeg killed
    /// mid-write.
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FastStartTranscoder for FakeFastStart {
    async fn fast_start(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let original = tokio::fs::read(input)
            .await
            .map_err(|e| MediaError::InvalidPath(e.to_string()))?;
        if self.fail {
            tokio::fs::write(output, FASTSTART_MARKER)
                .await
                .map_err(|e| MediaError::InvalidPath(e.to_string()))?;
            return Err(MediaError::Failed {
                tool: "ffmpeg",
                status: "exit status: 1".to_string(),
                stderr: "Error writing trailer".to_string(),
            });
        }
        let mut rewritten = FASTSTART_MARKER.to_vec();
        rewritten.extend_from_slice(&original);
        tokio::fs::write(output, rewritten)
            .await
            .map_err(|e| MediaError::InvalidPath(e.to_string()))?;
        Ok(())
    }
}
