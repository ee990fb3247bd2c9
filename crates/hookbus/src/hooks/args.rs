//! Keyword-argument map passed to hook implementations.

use std::collections::HashMap;

use serde_json::Value;

use hookbus_core::{PluginError, PluginResult};

/// Arbitrary hook arguments keyed by string — the dispatch payload.
pub type Kwargs = HashMap<String, Value>;

/// Borrowed view over [`Kwargs`] with typed accessors.
///
/// Implementations receive a `HookArgs` already filtered down to the
/// parameters they declared; accept-all implementations see the full set.
#[derive(Debug, Clone, Copy)]
pub struct HookArgs<'a> {
    /// The hook name, for error attribution.
    hook: &'a str,
    /// The (possibly filtered) argument map.
    data: &'a Kwargs,
}

impl<'a> HookArgs<'a> {
    /// Creates a view over an argument map.
    pub fn new(hook: &'a str, data: &'a Kwargs) -> Self {
        Self { hook, data }
    }

    /// The hook name being dispatched.
    pub fn hook(&self) -> &str {
        self.hook
    }

    /// The underlying argument map.
    pub fn raw(&self) -> &Kwargs {
        self.data
    }

    /// Number of arguments present.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no arguments are present.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets an argument by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Gets an argument, failing with a missing-argument error if absent.
    pub fn required(&self, key: &str) -> PluginResult<&Value> {
        self.data
            .get(key)
            .ok_or_else(|| PluginError::missing_argument(self.hook, key))
    }

    /// Gets a string argument.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    /// Gets an i64 argument.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.data.get(key).and_then(|v| v.as_i64())
    }

    /// Gets a bool argument.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.data.get(key).and_then(|v| v.as_bool())
    }
}
