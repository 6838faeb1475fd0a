//! Reconstructed query text of every literal compiled so far in a pass.
//!
//! Entries are keyed by the variable a literal was assigned to, so that a
//! later literal interpolating `${Name}` can prepend that document's text to
//! its own.

use rustc_hash::FxHashMap;
use tracing::trace;

#[derive(Debug, Default, Clone)]
pub struct FragmentRegistry {
    entries: FxHashMap<String, String>,
}

impl FragmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `text` under `name`, replacing any previous entry.
    pub fn put(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let name = name.into();
        let text = text.into();
        trace!(name = %name, len = text.len(), "registering query text");
        self.entries.insert(name, text);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Forgets every entry, e.g. between compilation units.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
