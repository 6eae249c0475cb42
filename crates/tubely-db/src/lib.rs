//! Tubely metadata store
//!
//! Repositories for video records: a Postgres implementation used in production
//! and an in-memory implementation used by tests.

pub mod db;

pub use db::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};
