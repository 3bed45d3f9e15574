//! Get/set listeners.
//!
//! A listener is a callback registered under a location suffix. Whenever a
//! location ending in that suffix is read ([`Action::Get`]) or written
//! ([`Action::Set`]) the callback runs inline with mutable access to the
//! store. A listener registered under the root location (the separator)
//! fires for every location.
//!
//! Listeners may read and write the store themselves. A dispatch for a
//! `(location, action)` pair that is already running is skipped, so a `get`
//! listener calling `get` on its own location does not recurse.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::conf::Conf;
use crate::error::{ConfError, Result};

/// The kind of access a listener intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Get,
    Set,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Get => "get",
            Action::Set => "set",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listener callback: `(store, location, value)`.
///
/// `value` is `None` when a `get` hits an absent location.
pub type ListenerFn = dyn Fn(&mut Conf, &str, Option<&Value>) -> Result<()>;

/// A registered callback and the location suffix it reacts to.
#[derive(Clone)]
pub struct Listener {
    matcher: String,
    callback: Rc<ListenerFn>,
}

impl Listener {
    pub fn matcher(&self) -> &str {
        &self.matcher
    }

    /// Check if this listener reacts to `loc`. `root` is the root location.
    pub fn matches(&self, loc: &str, root: &str) -> bool {
        self.matcher == root || loc.ends_with(self.matcher.as_str())
    }

    pub(crate) fn call(&self, conf: &mut Conf, loc: &str, value: Option<&Value>) -> Result<()> {
        (self.callback)(conf, loc, value)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("matcher", &self.matcher).finish_non_exhaustive()
    }
}

/// Ordered listeners per action, plus the set of dispatches in flight.
#[derive(Default)]
pub struct ListenerRegistry {
    get: Vec<Listener>,
    set: Vec<Listener>,
    processing: Rc<RefCell<HashSet<String>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener for `action`. An empty `matcher` is rejected.
    pub fn add(&mut self, action: Action, matcher: &str, callback: Rc<ListenerFn>) -> Result<()> {
        if matcher.is_empty() {
            return Err(ConfError::MissingMatcher);
        }
        let listener = Listener { matcher: matcher.to_string(), callback };
        match action {
            Action::Get => self.get.push(listener),
            Action::Set => self.set.push(listener),
        }
        Ok(())
    }

    /// Listeners for `action` in registration order.
    pub fn listeners(&self, action: Action) -> &[Listener] {
        match action {
            Action::Get => &self.get,
            Action::Set => &self.set,
        }
    }

    pub fn len(&self, action: Action) -> usize {
        self.listeners(action).len()
    }

    pub fn is_empty(&self, action: Action) -> bool {
        self.listeners(action).is_empty()
    }

    /// Removes every listener. Dispatches already running finish normally.
    pub fn clear(&mut self) {
        self.get.clear();
        self.set.clear();
    }

    pub fn is_processing(&self, loc: &str, action: Action) -> bool {
        self.processing.borrow().contains(&processing_key(loc, action))
    }

    /// Marks `(loc, action)` as in flight. Returns `None` if it already is.
    ///
    /// The mark is cleared when the returned guard drops, on every exit path.
    pub(crate) fn begin(&self, loc: &str, action: Action) -> Option<ProcessingGuard> {
        let key = processing_key(loc, action);
        if !self.processing.borrow_mut().insert(key.clone()) {
            return None;
        }
        Some(ProcessingGuard { processing: Rc::clone(&self.processing), key })
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("get", &self.get)
            .field("set", &self.set)
            .field("processing", &self.processing.borrow().len())
            .finish()
    }
}

fn processing_key(loc: &str, action: Action) -> String {
    let mut key = String::with_capacity(loc.len() + 3);
    key.push_str(loc);
    key.push_str(action.as_str());
    key
}

pub(crate) struct ProcessingGuard {
    processing: Rc<RefCell<HashSet<String>>>,
    key: String,
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.processing.borrow_mut().remove(&self.key);
    }
}

/// Registration handle returned by [`Conf::listen`].
pub struct Listen<'a> {
    registry: &'a mut ListenerRegistry,
}

impl<'a> Listen<'a> {
    pub(crate) fn new(registry: &'a mut ListenerRegistry) -> Self {
        Self { registry }
    }

    /// Calls `callback` after every read of a location ending in `matcher`.
    pub fn get<F>(&mut self, matcher: &str, callback: F) -> Result<()>
    where
        F: Fn(&mut Conf, &str, Option<&Value>) -> Result<()> + 'static,
    {
        self.registry.add(Action::Get, matcher, Rc::new(callback))
    }

    /// Calls `callback` after every write to a location ending in `matcher`.
    pub fn set<F>(&mut self, matcher: &str, callback: F) -> Result<()>
    where
        F: Fn(&mut Conf, &str, Option<&Value>) -> Result<()> + 'static,
    {
        self.registry.add(Action::Set, matcher, Rc::new(callback))
    }
}
