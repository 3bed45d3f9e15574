//! File loaders, keyed by extension.
//!
//! `.json` files are parsed as JSON, `.yml`/`.yaml` files as YAML. Any other
//! extension, or none, is read as UTF-8 text and stored as a string with its
//! content untouched (trailing newline included).

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;

/// Parses the file at a path into a configuration value.
pub type LoaderFn = fn(&Path) -> Result<Value>;

pub fn load_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn load_yaml(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

pub fn load_text(path: &Path) -> Result<Value> {
    Ok(Value::String(fs::read_to_string(path)?))
}

/// Extension to loader table. Extensions are stored without the leading dot.
#[derive(Clone)]
pub struct LoaderRegistry {
    loaders: IndexMap<String, LoaderFn>,
    fallback: LoaderFn,
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("json", load_json);
        registry.register("yml", load_yaml);
        registry.register("yaml", load_yaml);
        registry
    }
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that reads every file as text.
    pub fn empty() -> Self {
        Self {
            loaders: IndexMap::new(),
            fallback: load_text,
        }
    }

    /// Registers `loader` for `extension`, returning the loader it replaces.
    pub fn register(&mut self, extension: &str, loader: LoaderFn) -> Option<LoaderFn> {
        self.loaders.insert(extension.trim_start_matches('.').to_string(), loader)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    /// The loader `path` dispatches to.
    pub fn loader_for(&self, path: &Path) -> LoaderFn {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.loaders.get(ext))
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn load(&self, path: &Path) -> Result<Value> {
        (self.loader_for(path))(path)
    }
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("extensions", &self.loaders.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
