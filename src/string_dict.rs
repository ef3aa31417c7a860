//! Interning for property-name strings.
//!
//! Every function object carries `length` and `name`, every constructor a
//! `prototype`; the realm hands out one shared `Rc<str>` per distinct name so
//! these keys are built without allocating.

use crate::prelude::*;
use crate::value::{CheapClone, JsString};

/// A dictionary for deduplicating JsString instances.
pub struct StringDict {
    /// Box<str> keys avoid a double indirection through Rc on lookup.
    strings: FxHashMap<Box<str>, JsString>,
}

impl StringDict {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self {
            strings: FxHashMap::default(),
        }
    }

    /// Create a dictionary pre-populated with the names the built-ins use.
    pub fn with_common_strings() -> Self {
        let mut dict = Self::new();
        for s in COMMON_STRINGS {
            dict.get_or_insert(s);
        }
        dict
    }

    /// Get an existing string or insert a new one.
    pub fn get_or_insert(&mut self, s: &str) -> JsString {
        if let Some(existing) = self.strings.get(s) {
            return existing.cheap_clone();
        }
        let js_str = JsString::from(s);
        self.strings.insert(s.into(), js_str.cheap_clone());
        js_str
    }

    /// Get an existing string without inserting.
    pub fn get(&self, s: &str) -> Option<JsString> {
        self.strings.get(s).map(|s| s.cheap_clone())
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringDict {
    fn default() -> Self {
        Self::new()
    }
}

const COMMON_STRINGS: &[&str] = &[
    // Function object properties
    "length",
    "name",
    "prototype",
    "constructor",
    // Function.prototype
    "call",
    "apply",
    "bind",
    // Array.prototype
    "slice",
    "forEach",
    "push",
    // Object.prototype
    "hasOwnProperty",
    // Globals
    "globalThis",
    "Object",
    "Array",
    "console",
    // Console
    "log",
    "info",
    "debug",
    "warn",
    "error",
];
