//! Constants shared by the API and the ingestion pipeline.

/// Prefix for versioned API routes.
pub const API_PREFIX: &str = "/api/v0";

/// Route under which the thumbnail assets directory is served.
pub const ASSETS_ROUTE: &str = "/assets";

/// Route under which the local video storage directory is served.
pub const LOCAL_MEDIA_ROUTE: &str = "/media";

/// Multipart field carrying thumbnail bytes.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Multipart field carrying video bytes.
pub const VIDEO_FIELD: &str = "video";

/// Thumbnail content types accepted by the ingestion pipeline.
pub const THUMBNAIL_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg"];

/// The only video content type accepted by the ingestion pipeline.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Extension used for every stored video object.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Number of random bytes behind every generated asset name.
pub const RANDOM_TOKEN_BYTES: usize = 32;

/// Issuer claim of access tokens.
pub const JWT_ISSUER: &str = "tubely-access";
