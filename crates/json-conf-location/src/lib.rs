//! Location string utilities.
//!
//! A location addresses a node in a configuration tree by joining keys with a
//! separator, `.` by default: `"server.http.port"`. Empty segments are
//! ignored, and the special segment `<<` steps back to the parent of whatever
//! was pushed before it. The root of the tree is addressed by the separator
//! alone.
//!
//! # Example
//!
//! ```
//! use json_conf_location::{join, key_name, split};
//!
//! // Join fragments into one canonical location
//! assert_eq!(join(".", &["a.b", "<<", "c"]), "a.c");
//! assert_eq!(join(".", &["foo", ".", "bar", "", "baz"]), "foo.bar.baz");
//!
//! // Split a location back into keys
//! assert_eq!(split(".", "a..b."), vec!["a", "b"]);
//!
//! // The mutation key is the last segment
//! assert_eq!(key_name(".", "base.path.key1"), Some("key1"));
//! ```

pub mod types;
pub use types::LocationParts;

mod util;
pub use util::{
    is_root, key_name, normalize_key, parent_location, segments_of, split,
};

/// Separator used between location segments unless configured otherwise.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Replacement for the separator when a key is normalized into an identifier.
pub const DEFAULT_NORMALIZED_SEPARATOR: &str = "-";

/// Segment that pops the previously pushed segment during [`join`].
pub const PARENT_SEGMENT: &str = "<<";

/// Joins location fragments into one location string.
///
/// Each fragment is split by `sep`; non-empty segments are pushed onto the
/// result and [`PARENT_SEGMENT`] pops the last pushed one. Popping an empty
/// result is a no-op. The returned string is empty when nothing remains,
/// which callers treat as the root.
///
/// # Example
///
/// ```
/// use json_conf_location::join;
///
/// assert_eq!(join(".", &["foo", "bar"]), "foo.bar");
/// assert_eq!(join(".", &["a", "b", "<<"]), "a");
/// assert_eq!(join(".", &["a", "", "b"]), "a.b");
/// assert_eq!(join(".", &["<<", "<<", "a"]), "a");
/// assert_eq!(join(".", "."), "");
/// ```
pub fn join<P: LocationParts + ?Sized>(sep: &str, parts: &P) -> String {
    let mut keys: Vec<&str> = Vec::new();
    for fragment in parts.fragments() {
        for segment in segments_of(sep, fragment) {
            if segment == PARENT_SEGMENT {
                keys.pop();
            } else {
                keys.push(segment);
            }
        }
    }
    keys.join(sep)
}
