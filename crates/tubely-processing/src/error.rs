use thiserror::Error;

/// Failures of the external media tools.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    #[error("Failed to execute {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} timed out after {seconds}s")]
    Timeout { tool: &'static str, seconds: u64 },

    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: &'static str,
        status: String,
        stderr: String,
    },

    #[error("Failed to parse {tool} output: {message}")]
    InvalidOutput { tool: &'static str, message: String },

    #[error("No video streams found")]
    NoStreams,
}
