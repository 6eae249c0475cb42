//! Tubely Media Processing Library
//!
//! Wraps the external media toolchain behind narrow traits: an inspector that
//! reports stream dimensions (ffprobe) and a transcoder that rewrites an MP4 so
//! its metadata atom comes first (ffmpeg). Aspect-ratio classification of the
//! reported dimensions lives in [`aspect`].

pub mod aspect;
pub mod error;
pub mod traits;
pub mod video;

// Re-export commonly used types
pub use aspect::AspectRatio;
pub use error::MediaError;
pub use traits::{FastStartTranscoder, MediaInspector, StreamInfo};
pub use video::{fast_start_output_path, FfmpegFastStart, FfprobeInspector};
