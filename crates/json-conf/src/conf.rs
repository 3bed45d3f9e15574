//! The configuration store.

use std::fmt;
use std::path::Path;

use json_conf_location::{self as location, LocationParts};
use json_conf_util::{clone, merge, merge_into};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{ConfError, Result};
use crate::listener::{Action, Listen, ListenerRegistry};
use crate::loader::{LoaderFn, LoaderRegistry};
use crate::options::ConfOptions;
use crate::serialize::{to_json_string, to_yaml_string};

/// A configuration tree addressed by location strings.
///
/// Every operation taking `parts` accepts a single location (`"a.b.c"`) or
/// several fragments (`["a", "b", "<<", "c"]`) which are joined first. An
/// empty result addresses the root.
pub struct Conf {
    root: Value,
    options: ConfOptions,
    listeners: ListenerRegistry,
    loaders: LoaderRegistry,
}

impl Default for Conf {
    fn default() -> Self {
        Self::with_options(ConfOptions::default())
    }
}

impl fmt::Debug for Conf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conf")
            .field("root", &self.root)
            .field("options", &self.options)
            .field("listeners", &self.listeners)
            .field("loaders", &self.loaders)
            .finish()
    }
}

impl Conf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfOptions) -> Self {
        Self {
            root: Value::Object(Map::new()),
            options,
            listeners: ListenerRegistry::new(),
            loaders: LoaderRegistry::new(),
        }
    }

    /// Creates a store holding `root` as its tree.
    pub fn from_root(root: Value) -> Self {
        let mut conf = Self::default();
        conf.root = root;
        conf
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Direct access to the tree. Listeners are bypassed.
    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    /// Replaces the whole tree, returning the previous one.
    pub fn set_root(&mut self, root: Value) -> Value {
        std::mem::replace(&mut self.root, root)
    }

    pub fn options(&self) -> &ConfOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ConfOptions {
        &mut self.options
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    /// Registers a loader for files with `extension`.
    pub fn register_loader(&mut self, extension: &str, loader: LoaderFn) -> Option<LoaderFn> {
        self.loaders.register(extension, loader)
    }

    // ---------------------------------------------------------------- locations

    /// The root location, i.e. the separator.
    pub fn root_location(&self) -> &str {
        &self.options.separator
    }

    /// Joins fragments with the configured separator. May return an empty
    /// string; see [`Conf::location`] for the root-aware form.
    pub fn join<P: LocationParts + ?Sized>(&self, parts: &P) -> String {
        location::join(&self.options.separator, parts)
    }

    /// Joins fragments into a location, substituting the root location when
    /// nothing remains.
    pub fn location<P: LocationParts + ?Sized>(&self, parts: &P) -> String {
        let loc = self.join(parts);
        if loc.is_empty() {
            return self.options.separator.clone();
        }
        loc
    }

    /// Splits `parts` and `value` into a canonical `(location, value)` pair.
    pub fn normalize_location<P: LocationParts, T>(&self, parts: P, value: T) -> (String, T) {
        (self.location(&parts), value)
    }

    pub fn normalize_key(&self, key: &str) -> String {
        location::normalize_key(key, &self.options.separator, &self.options.normalized_separator)
    }

    /// Last segment of `loc`. `None` for the root.
    pub fn key_name<'a>(&'a self, loc: &'a str) -> Option<&'a str> {
        location::key_name(&self.options.separator, loc)
    }

    pub fn is_root(&self, loc: &str) -> bool {
        location::is_root(&self.options.separator, loc)
    }

    /// `loc` minus its last segment, the root location for a top-level key.
    /// `None` for the root itself.
    pub fn parent_location(&self, loc: &str) -> Option<String> {
        location::parent_location(&self.options.separator, loc).map(|parent| self.location(parent.as_str()))
    }

    /// Locations of the direct keys of the mapping at `parts`, optionally
    /// only the key equal to `matcher`. Empty when the value is absent or is
    /// not a mapping. Listeners are not triggered.
    pub fn child_locations<P: LocationParts>(&self, parts: P, matcher: Option<&str>) -> Vec<String> {
        let loc = self.location(&parts);
        let Some(Value::Object(map)) = self.lookup(&loc) else {
            return Vec::new();
        };
        map.keys()
            .filter(|key| matcher.map_or(true, |m| m == key.as_str()))
            .map(|key| self.join(&[loc.as_str(), key.as_str()]))
            .collect()
    }

    /// Every location below `parts`, at any depth, whose last segment equals
    /// `matcher`. Depth first, in key order.
    pub fn descendant_locations<P: LocationParts>(&self, parts: P, matcher: &str) -> Result<Vec<String>> {
        if matcher.is_empty() {
            return Err(ConfError::MissingDescendantMatcher);
        }
        let loc = self.location(&parts);
        let mut found = Vec::new();
        self.collect_descendants(&loc, matcher, &mut found);
        Ok(found)
    }

    fn collect_descendants(&self, loc: &str, matcher: &str, found: &mut Vec<String>) {
        for child in self.child_locations(loc, None) {
            if self.key_name(&child) == Some(matcher) {
                found.push(child.clone());
            }
            self.collect_descendants(&child, matcher, found);
        }
    }

    /// Finds the nearest direct child named `matcher`, looking at `parts`
    /// first and then at each ancestor up to the root.
    ///
    /// Returns `None` when no level up to and including the root has such a
    /// child.
    pub fn ancestor_location<P: LocationParts>(&self, parts: P, matcher: &str) -> Option<String> {
        let mut loc = self.location(&parts);
        loop {
            let mut found = self.child_locations(loc.as_str(), Some(matcher));
            if found.len() == 1 {
                return found.pop();
            }
            loc = self.parent_location(&loc)?;
        }
    }

    // --------------------------------------------------------------- tree access

    /// Read-only lookup. Never creates nodes and never triggers listeners.
    pub fn lookup(&self, loc: &str) -> Option<&Value> {
        let mut current = &self.root;
        for key in location::segments_of(&self.options.separator, loc) {
            current = current.as_object()?.get(key)?;
        }
        Some(current)
    }

    /// Splits a non-root location into the keys of its parent and its own key.
    fn address(&self, loc: &str) -> Option<(Vec<String>, String)> {
        let mut keys: Vec<String> = location::split(&self.options.separator, loc)
            .into_iter()
            .map(str::to_string)
            .collect();
        let key = keys.pop()?;
        Some((keys, key))
    }

    /// Returns the value at `loc` after running the `get` listeners.
    ///
    /// Listeners see the value as it was before dispatch; the returned value
    /// reflects any writes they made. The root is returned as is.
    pub fn get_value(&mut self, loc: &str) -> Result<Option<&Value>> {
        let loc = self.location(loc);
        if self.is_root(&loc) {
            return Ok(Some(&self.root));
        }
        if !self.listeners.is_empty(Action::Get) {
            let current = self.lookup(&loc).cloned();
            self.process(Action::Get, &loc, current.as_ref())?;
        }
        Ok(self.lookup(&loc))
    }

    /// Low-level write. Merges into the tree at the root, otherwise assigns,
    /// creating intermediate mappings. No listeners run.
    pub fn set_value(&mut self, loc: &str, value: Value) {
        let loc = self.location(loc);
        let Some((path, key)) = self.address(&loc) else {
            self.merge_root(&value);
            return;
        };
        parent_or_create(&mut self.root, &path).insert(key, value);
    }

    pub fn get<P: LocationParts>(&mut self, parts: P) -> Result<Option<&Value>> {
        let loc = self.location(&parts);
        self.get_value(&loc)
    }

    /// Triggers the `get` listeners for `parts` without using the value.
    pub fn touch<P: LocationParts>(&mut self, parts: P) -> Result<()> {
        self.get(parts).map(|_| ())
    }

    /// Writes `value` at `parts` and runs the `set` listeners with the value
    /// that was stored.
    ///
    /// A mapping written over a mapping is merged into it. At the root the
    /// value is merged into the tree and no listeners run.
    pub fn set<P: LocationParts>(&mut self, parts: P, value: Value) -> Result<()> {
        let loc = self.location(&parts);
        let Some((path, key)) = self.address(&loc) else {
            self.merge_root(&value);
            return Ok(());
        };

        let parent = parent_or_create(&mut self.root, &path);
        let value = match parent.get(&key) {
            Some(existing @ Value::Object(_)) if value.is_object() => merge(existing, &value),
            _ => value,
        };
        let stored = (!self.listeners.is_empty(Action::Set)).then(|| value.clone());
        parent.insert(key, value);

        match stored {
            Some(stored) => self.process(Action::Set, &loc, Some(&stored)),
            None => Ok(()),
        }
    }

    /// Deletes the key at `parts`. Absent keys and the root are left alone.
    pub fn remove<P: LocationParts>(&mut self, parts: P) -> Option<Value> {
        let loc = self.location(&parts);
        let (path, key) = self.address(&loc)?;
        let removed = parent_of_mut(&mut self.root, &path)?.shift_remove(&key);
        trace!(location = %loc, removed = removed.is_some(), "remove");
        removed
    }

    /// Appends `value` to the value at `parts`.
    ///
    /// An absent value is set. Strings concatenate with strings and sequences
    /// with sequences; anything else fails with
    /// [`ConfError::InvalidAppend`] and leaves the tree untouched.
    pub fn append<P: LocationParts>(&mut self, parts: P, value: Value) -> Result<()> {
        let loc = self.location(&parts);
        let current = self.get_value(&loc)?.cloned();
        let appended = match (current, value) {
            (None, value) => value,
            (Some(Value::String(mut old)), Value::String(new)) => {
                old.push_str(&new);
                Value::String(old)
            }
            (Some(Value::Array(mut old)), Value::Array(new)) => {
                old.extend(new);
                Value::Array(old)
            }
            _ => return Err(ConfError::InvalidAppend { location: loc }),
        };
        self.set(loc.as_str(), appended)
    }

    /// A deep copy of the value at `parts`.
    pub fn copy<P: LocationParts>(&mut self, parts: P) -> Result<Option<Value>> {
        Ok(self.get(parts)?.map(clone))
    }

    /// Loads the file at `path` and sets its content at `parts`.
    ///
    /// The loader is picked by extension; see [`crate::loader`].
    pub fn load<P: LocationParts>(&mut self, parts: P, path: impl AsRef<Path>) -> Result<()> {
        let loc = self.location(&parts);
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfError::FileNotFound(path.to_path_buf()));
        }
        let value = self.loaders.load(path)?;
        debug!(location = %loc, path = %path.display(), "loaded file");
        self.set(loc.as_str(), value)
    }

    fn merge_root(&mut self, value: &Value) {
        debug!("merging value into root");
        merge_into(&mut self.root, value);
    }

    // ----------------------------------------------------------------- listeners

    /// Handle for registering `get` and `set` listeners.
    ///
    /// ```
    /// use json_conf::Conf;
    /// use serde_json::json;
    ///
    /// let mut conf = Conf::new();
    /// conf.listen().set("port", |conf, _loc, val| {
    ///     let port = val.and_then(|v| v.as_u64()).unwrap_or_default();
    ///     conf.set("server.url", json!(format!("http://localhost:{port}")))
    /// }).unwrap();
    ///
    /// conf.set("server.port", json!(8080)).unwrap();
    /// assert_eq!(conf.get("server.url").unwrap(), Some(&json!("http://localhost:8080")));
    /// ```
    pub fn listen(&mut self) -> Listen<'_> {
        Listen::new(&mut self.listeners)
    }

    /// Runs the listeners for `action` that match `loc`, in registration
    /// order.
    ///
    /// Skipped when the same `(loc, action)` dispatch is already running. The
    /// first listener error stops the chain and is returned.
    pub fn process(&mut self, action: Action, loc: &str, value: Option<&Value>) -> Result<()> {
        let Some(_guard) = self.listeners.begin(loc, action) else {
            trace!(location = loc, %action, "dispatch already running, skipped");
            return Ok(());
        };
        let listeners = self.listeners.listeners(action).to_vec();
        let root = self.options.separator.clone();
        let mut fired = 0usize;
        for listener in listeners.iter().filter(|l| l.matches(loc, &root)) {
            fired += 1;
            listener.call(self, loc, value)?;
        }
        if fired > 0 {
            debug!(location = loc, %action, fired, "listeners dispatched");
        }
        Ok(())
    }

    // ------------------------------------------------------------- serialization

    /// The tree as JSON, indented with the configured unit.
    pub fn to_json(&self) -> Result<String> {
        to_json_string(&self.root, self.options.json_indent())
    }

    pub fn to_yaml(&self) -> Result<String> {
        to_yaml_string(&self.root)
    }
}

/// Walks `path` from `root`, replacing anything that is not a mapping with an
/// empty one, and returns the mapping at the end.
fn parent_or_create<'a>(root: &'a mut Value, path: &[String]) -> &'a mut Map<String, Value> {
    let mut current = as_map_or_reset(root);
    for key in path {
        let child = current.entry(key.as_str()).or_insert_with(|| Value::Object(Map::new()));
        current = as_map_or_reset(child);
    }
    current
}

fn parent_of_mut<'a>(root: &'a mut Value, path: &[String]) -> Option<&'a mut Map<String, Value>> {
    let mut current = root.as_object_mut()?;
    for key in path {
        current = current.get_mut(key)?.as_object_mut()?;
    }
    Some(current)
}

fn as_map_or_reset(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just reset to a mapping"),
    }
}
