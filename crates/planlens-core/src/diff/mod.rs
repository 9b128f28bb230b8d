//! Structural diff engine.
//!
//! Compares two tree-shaped plan states and produces a flat map of
//! differences keyed by path.
//!
//! ## Entry point
//!
//! ```
//! use planlens_core::diff::{compute_differences, DiffOptions};
//! use serde_json::json;
//!
//! let before = json!({"a": 1, "b": 2});
//! let after = json!({"b": 3, "c": 4});
//! let diff = compute_differences(&before, &after, &DiffOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(diff.added["c"], json!(4));
//! assert_eq!(diff.removed["a"], json!(1));
//! assert_eq!(diff.changed["b"].after, json!(3));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical output; result maps
//!   are sorted by path.
//! - **Positional sequences**: list elements are compared index by index, not
//!   matched by content.
//! - **Bounded recursion**: nesting beyond `DiffOptions::max_depth` is an
//!   error, never a partial diff.

pub mod engine;
pub mod model;

pub use engine::{compute_differences, find_differences, DiffOptions, DEFAULT_MAX_DEPTH};
pub use model::{DifferenceSet, ValueChange};
