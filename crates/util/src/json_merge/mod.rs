//! JSON merge utilities.
//!
//! Overlays one mapping onto another. Sequences are replaced wholesale,
//! never merged element-wise.

mod merge;

pub use merge::{merge, merge_action, merge_into, MergeAction};
