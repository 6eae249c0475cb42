//! Aspect-ratio classification of video dimensions.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::MediaError;
use crate::traits::StreamInfo;

/// Orientation bucket of a video, used as the object-key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    /// 16:9
    Landscape,
    /// 9:16
    Portrait,
    Other,
}

impl AspectRatio {
    /// Classify with exact integer arithmetic. Division truncates, so
    /// 1920x1080 is landscape but 1921x1080 is not.
    pub fn classify(width: u32, height: u32) -> Self {
        let (w, h) = (u64::from(width), u64::from(height));
        if w == 16 * h / 9 {
            AspectRatio::Landscape
        } else if h == 16 * w / 9 {
            AspectRatio::Portrait
        } else {
            AspectRatio::Other
        }
    }

    /// Classify the first reported stream.
    pub fn from_streams(streams: &[StreamInfo]) -> Result<Self, MediaError> {
        let first = streams.first().ok_or(MediaError::NoStreams)?;
        Ok(Self::classify(first.width, first.height))
    }

    pub fn ratio(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Other => "other",
        }
    }

    pub fn key_prefix(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "landscape",
            AspectRatio::Portrait => "portrait",
            AspectRatio::Other => "other",
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.ratio())
    }
}
