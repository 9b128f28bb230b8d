//! Change classification pipeline.
//!
//! Groups entity-change records into six overlapping category lists and keeps
//! per-token summary counters. Control records (first action token is create,
//! delete, update or replace) carry a structural diff of their state.

pub mod engine;
pub mod model;

pub use engine::{categories_for, change_details, classify};
pub use model::{
    ActionToken, Category, ChangeSummary, ClassificationBatch, EntityChange, ResourceChange,
};
