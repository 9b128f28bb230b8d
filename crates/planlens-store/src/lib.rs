//! planlens Store - file input and output around the core
//!
//! Provides:
//! - Plan document loading from JSON files
//! - A file sink that exports each classified category as its own JSON file
//! - Atomic write primitive (temp file + rename)

pub mod atomic;
pub mod errors;
pub mod json_sink;
pub mod loader;

// Re-export key types
pub use errors::Result;
pub use json_sink::JsonFileSink;
pub use loader::{load_json, load_plan};
