//! Database repositories for the data access layer

mod memory;
mod videos;

pub use memory::InMemoryVideoRepository;
pub use videos::{PgVideoRepository, VideoRepository};
