//! Text rendering of a configuration tree.

use std::io;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::error::Result;

/// Renders `value` as JSON, indenting each level with `indent`.
///
/// `None` renders compact JSON.
pub fn to_json_string(value: &Value, indent: Option<&str>) -> Result<String> {
    let Some(indent) = indent else {
        return Ok(serde_json::to_string(value)?);
    };
    let mut out = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut ser)?;
    // The formatter only emits UTF-8 given a `&str` indent.
    Ok(String::from_utf8(out).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?)
}

/// Renders `value` as a block-style YAML document.
pub fn to_yaml_string(value: &Value) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}
