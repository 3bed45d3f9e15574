//! Location-addressed configuration store.
//!
//! A [`Conf`] holds one tree of mappings, sequences and scalars. Values are
//! read and written through dot-delimited locations, mappings written over
//! mappings are deep-merged, and listeners can intercept reads and writes of
//! matching locations. Trees load from JSON, YAML or plain text files and
//! render back to JSON or YAML.
//!
//! # Example
//!
//! ```
//! use json_conf::Conf;
//! use serde_json::json;
//!
//! let mut conf = Conf::new();
//! conf.set("path.separated.key", json!("value")).unwrap();
//! conf.set(["path", "separated"], json!({"other": 1})).unwrap();
//!
//! assert_eq!(conf.get("path.separated").unwrap(), Some(&json!({"key": "value", "other": 1})));
//! assert_eq!(conf.get(["path", "separated", "<<", "separated.key"]).unwrap(), Some(&json!("value")));
//!
//! conf.append("path.list", json!(["a"])).unwrap();
//! conf.append("path.list", json!(["b"])).unwrap();
//! assert_eq!(conf.get("path.list").unwrap(), Some(&json!(["a", "b"])));
//!
//! conf.options_mut().json_indent = None;
//! assert_eq!(
//!     conf.to_json().unwrap(),
//!     r#"{"path":{"separated":{"key":"value","other":1},"list":["a","b"]}}"#
//! );
//! ```

pub mod conf;
pub mod error;
pub mod listener;
pub mod loader;
pub mod options;
pub mod serialize;

pub use conf::Conf;
pub use error::{ConfError, Result};
pub use listener::{Action, Listen, Listener, ListenerFn, ListenerRegistry};
pub use loader::{LoaderFn, LoaderRegistry};
pub use options::ConfOptions;

pub use json_conf_location::{join, LocationParts};
pub use json_conf_util::{clone, merge, merge_into};
