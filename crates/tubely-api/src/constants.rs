//! Route and upload constants, re-exported from `tubely_core` so handlers and tests
//! share one definition.

pub use tubely_core::constants::*;
