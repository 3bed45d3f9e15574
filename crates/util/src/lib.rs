//! json-conf-util - Value utilities for json-conf
//!
//! Deep clone and deep merge over `serde_json::Value` trees.

pub mod json_clone;
pub mod json_merge;

// Re-exports for convenience
pub use json_clone::clone;
pub use json_merge::{merge, merge_action, merge_into, MergeAction};
