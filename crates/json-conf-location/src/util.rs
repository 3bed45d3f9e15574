/// Iterates the non-empty segments of a location.
///
/// An empty separator leaves the whole location as a single segment.
pub fn segments_of<'a>(sep: &'a str, loc: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    let parts: Box<dyn Iterator<Item = &'a str> + 'a> = if sep.is_empty() {
        Box::new(std::iter::once(loc))
    } else {
        Box::new(loc.split(sep))
    };
    parts.filter(|segment| !segment.is_empty())
}

/// Splits a location into the keys used to walk the tree from the root.
///
/// # Example
///
/// ```
/// use json_conf_location::split;
///
/// assert_eq!(split(".", "a.b.c"), vec!["a", "b", "c"]);
/// assert!(split(".", ".").is_empty());
/// ```
pub fn split<'a>(sep: &'a str, loc: &'a str) -> Vec<&'a str> {
    segments_of(sep, loc).collect()
}

/// Check if a location addresses the root of the tree.
///
/// Both the separator itself and a location without any segment qualify.
pub fn is_root(sep: &str, loc: &str) -> bool {
    loc == sep || segments_of(sep, loc).next().is_none()
}

/// Returns the last segment of a location, the key under which the value is
/// stored in its parent. `None` for the root.
pub fn key_name<'a>(sep: &'a str, loc: &'a str) -> Option<&'a str> {
    segments_of(sep, loc).last()
}

/// Returns the location of the parent node. `None` for the root.
///
/// # Example
///
/// ```
/// use json_conf_location::parent_location;
///
/// assert_eq!(parent_location(".", "a.b.c"), Some("a.b".to_string()));
/// assert_eq!(parent_location(".", "a"), Some(String::new()));
/// assert_eq!(parent_location(".", "."), None);
/// ```
pub fn parent_location(sep: &str, loc: &str) -> Option<String> {
    let mut keys = split(sep, loc);
    keys.pop()?;
    Some(keys.join(sep))
}

/// Replaces every separator occurrence in `key` so it can serve as an
/// identifier.
///
/// # Example
///
/// ```
/// use json_conf_location::normalize_key;
///
/// assert_eq!(normalize_key("foo.bar.baz", ".", "-"), "foo-bar-baz");
/// ```
pub fn normalize_key(key: &str, sep: &str, sep_normalized: &str) -> String {
    if sep.is_empty() || !key.contains(sep) {
        return key.to_string();
    }
    key.replace(sep, sep_normalized)
}
