//! Store options.
//!
//! [`ConfOptions`] controls how locations are split and how the tree is
//! rendered as JSON. Options can be changed on a live store through
//! [`Conf::options_mut`](crate::Conf::options_mut); the change applies to
//! every later call.

use json_conf_location::{DEFAULT_NORMALIZED_SEPARATOR, DEFAULT_SEPARATOR};
use serde::{Deserialize, Serialize};

/// Longest indentation unit accepted by [`ConfOptions::with_json_indent_width`].
pub const MAX_JSON_INDENT: usize = 10;

/// Options for a [`Conf`](crate::Conf) store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfOptions {
    /// Separator between location segments. Also the root location.
    /// Must not be empty.
    pub separator: String,
    /// Replaces the separator in [`Conf::normalize_key`](crate::Conf::normalize_key).
    pub normalized_separator: String,
    /// Indentation unit for [`Conf::to_json`](crate::Conf::to_json).
    /// `None` or an empty string renders compact JSON.
    pub json_indent: Option<String>,
}

impl Default for ConfOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            normalized_separator: DEFAULT_NORMALIZED_SEPARATOR.to_string(),
            json_indent: Some("\t".to_string()),
        }
    }
}

impl ConfOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_normalized_separator(mut self, separator: impl Into<String>) -> Self {
        self.normalized_separator = separator.into();
        self
    }

    pub fn with_json_indent(mut self, indent: impl Into<String>) -> Self {
        self.json_indent = Some(indent.into());
        self
    }

    /// Indents JSON output with `width` spaces per level, capped at
    /// [`MAX_JSON_INDENT`]. A width of zero renders compact JSON.
    pub fn with_json_indent_width(mut self, width: usize) -> Self {
        let width = width.min(MAX_JSON_INDENT);
        self.json_indent = (width > 0).then(|| " ".repeat(width));
        self
    }

    pub fn compact_json(mut self) -> Self {
        self.json_indent = None;
        self
    }

    /// The indentation unit to use, if any.
    pub fn json_indent(&self) -> Option<&str> {
        self.json_indent.as_deref().filter(|indent| !indent.is_empty())
    }
}
