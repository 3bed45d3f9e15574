use serde_json::{Map, Value};

/// Creates a deep copy of a configuration value.
///
/// Scalars are copied as-is, sequences element by element and mappings
/// entry by entry, keeping key order. The result owns every container it
/// holds, so later writes to either side never show up in the other.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_conf_util::json_clone::clone;
///
/// let original = json!({"types": {"arr": ["foo", "bar"], "int": 10}});
/// let mut copy = clone(&original);
/// copy["types"]["arr"][0] = json!("changed");
///
/// assert_eq!(original["types"]["arr"][0], json!("foo"));
/// ```
pub fn clone(value: &Value) -> Value {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
        Value::Array(arr) => Value::Array(arr.iter().map(clone).collect()),
        Value::Object(obj) => Value::Object(clone_map(obj)),
    }
}

pub(crate) fn clone_map(obj: &Map<String, Value>) -> Map<String, Value> {
    let mut new_obj = Map::with_capacity(obj.len());
    for (key, val) in obj {
        new_obj.insert(key.clone(), clone(val));
    }
    new_obj
}
