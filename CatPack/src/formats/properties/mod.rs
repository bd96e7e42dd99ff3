//! `.properties` text format
//!
//! ISO-8859-1 encoded `key=value` files, as used by catalog libraries for the
//! default-locale catalog and its per-locale overlays.

mod reader;
mod writer;

pub use reader::{decode_latin1, parse_properties, parse_properties_bytes};
pub use writer::{PropertiesWriter, encode_latin1, escape_value};

use indexmap::IndexMap;

/// Parsed properties, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    pub entries: IndexMap<String, String>,
}

impl Properties {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Get a property value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Get an indexed property value (`key#index`)
    #[must_use]
    pub fn get_indexed(&self, key: &str, index: usize) -> Option<&str> {
        self.get(&indexed_key(key, index))
    }

    /// Check if an indexed property exists
    #[must_use]
    pub fn contains_indexed(&self, key: &str, index: usize) -> bool {
        self.entries.contains_key(&indexed_key(key, index))
    }

    /// Insert or replace a property
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build a positional key such as `name#3`
#[must_use]
pub fn indexed_key(key: &str, index: usize) -> String {
    format!("{key}#{index}")
}
