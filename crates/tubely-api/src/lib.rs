//! Tubely API Library
//!
//! This crate provides the HTTP handlers, the ingestion pipeline and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod extractors;
mod handlers;
mod middleware;
pub mod services;
pub mod setup;
mod telemetry;
pub mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use api_doc::ApiDoc;
pub use error::{ErrorResponse, HttpAppError};
