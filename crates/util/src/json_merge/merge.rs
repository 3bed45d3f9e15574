use serde_json::Value;

use crate::json_clone::clone;

/// What happens to one key of the destination during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    /// The destination takes a deep copy of the incoming value.
    Replace,
    /// The destination is a mapping; merge the incoming value into it. An
    /// incoming scalar has no keys, so the mapping is kept as is.
    Recurse,
}

/// Decides how an incoming value lands on the existing value under the same
/// key.
///
/// Sequences always replace. Anything else landing on a mapping recurses.
/// Every other pairing, including a missing destination key, replaces.
pub fn merge_action(existing: Option<&Value>, incoming: &Value) -> MergeAction {
    match (existing, incoming) {
        (_, Value::Array(_)) => MergeAction::Replace,
        (Some(Value::Object(_)), _) => MergeAction::Recurse,
        _ => MergeAction::Replace,
    }
}

/// Merges `from` over `to` and returns the result as a new value.
///
/// `to` is left untouched. See [`merge_into`] for how non-mapping sides are
/// handled.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_conf_util::json_merge::merge;
///
/// let to = json!({"x": [1, 2], "obj": {"a": 1}});
/// let from = json!({"x": [3], "obj": {"b": 2}});
///
/// assert_eq!(merge(&to, &from), json!({"x": [3], "obj": {"a": 1, "b": 2}}));
/// assert_eq!(to, json!({"x": [1, 2], "obj": {"a": 1}}));
/// ```
pub fn merge(to: &Value, from: &Value) -> Value {
    let mut merged = clone(to);
    merge_into(&mut merged, from);
    merged
}

/// Merges `from` over `to` in place.
///
/// Values taken from `from` are deep copies, so `to` never shares structure
/// with `from` afterwards. A sequence `from` replaces `to` wholesale, a
/// mapping `from` replaces a non-mapping `to`, and a scalar `from` leaves
/// `to` unchanged.
pub fn merge_into(to: &mut Value, from: &Value) {
    match (to, from) {
        (Value::Object(to_map), Value::Object(from_map)) => {
            for (key, value) in from_map {
                match merge_action(to_map.get(key), value) {
                    MergeAction::Recurse => {
                        if let Some(existing) = to_map.get_mut(key) {
                            merge_into(existing, value);
                        }
                    }
                    MergeAction::Replace => {
                        to_map.insert(key.clone(), clone(value));
                    }
                }
            }
        }
        (to, from @ (Value::Array(_) | Value::Object(_))) => *to = clone(from),
        _ => {}
    }
}
