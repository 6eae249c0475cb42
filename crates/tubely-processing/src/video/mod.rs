//! ffprobe / ffmpeg backed implementations of the media traits.

mod command;
mod faststart;
mod probe;

pub use faststart::{fast_start_output_path, FfmpegFastStart};
pub use probe::FfprobeInspector;
