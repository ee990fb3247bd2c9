//! Keyword-parameter inspection for hook implementations.
//!
//! Rust has no runtime signature reflection, so the parameter names an
//! implementation accepts are captured once, at declaration time — by the
//! `hookimpl!` macro or an explicit constructor — and carried alongside the
//! callable. A callable whose parameters cannot be stated is
//! [`ArgSpec::AcceptAll`], never an error: dispatch falls back to passing
//! the full keyword set.

use serde::{Deserialize, Serialize};

use crate::hooks::args::Kwargs;

/// The keyword parameters a hook implementation accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgSpec {
    /// Accepts exactly these keyword parameters, in declaration order.
    Named(Vec<String>),
    /// Accepts arbitrary keyword arguments — the full set is passed through.
    AcceptAll,
}

impl ArgSpec {
    /// Builds a named spec from string slices.
    pub fn from_names(names: &[&str]) -> Self {
        Self::Named(names.iter().map(|n| (*n).to_string()).collect())
    }

    /// Returns whether this spec accepts the given keyword.
    pub fn accepts(&self, key: &str) -> bool {
        match self {
            Self::Named(names) => names.iter().any(|n| n == key),
            Self::AcceptAll => true,
        }
    }

    /// Returns the subset of `kwargs` this spec accepts.
    ///
    /// For [`ArgSpec::Named`], keys not in the parameter list are dropped and
    /// parameters absent from `kwargs` are simply omitted — an implementation
    /// that needs one raises its own error when invoked. For
    /// [`ArgSpec::AcceptAll`], the full set is returned.
    pub fn keyword_subset(&self, kwargs: &Kwargs) -> Kwargs {
        match self {
            Self::Named(names) => names
                .iter()
                .filter_map(|name| kwargs.get(name).map(|v| (name.clone(), v.clone())))
                .collect(),
            Self::AcceptAll => kwargs.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kwargs() -> Kwargs {
        let mut kw = Kwargs::new();
        kw.insert("x".to_string(), json!(1));
        kw.insert("y".to_string(), json!(2));
        kw
    }

    #[test]
    fn test_named_subset_drops_unknown_keys() {
        let spec = ArgSpec::from_names(&["x"]);
        let subset = spec.keyword_subset(&kwargs());
        assert_eq!(subset.len(), 1);
        assert_eq!(subset.get("x"), Some(&json!(1)));
        assert!(!subset.contains_key("y"));
    }

    #[test]
    fn test_named_subset_omits_missing_parameters() {
        let spec = ArgSpec::from_names(&["x", "z"]);
        let subset = spec.keyword_subset(&kwargs());
        assert_eq!(subset.len(), 1);
        assert!(!subset.contains_key("z"));
    }

    #[test]
    fn test_accept_all_passes_everything() {
        let spec = ArgSpec::AcceptAll;
        let subset = spec.keyword_subset(&kwargs());
        assert_eq!(subset.len(), 2);
    }

    #[test]
    fn test_accepts() {
        let spec = ArgSpec::from_names(&["path"]);
        assert!(spec.accepts("path"));
        assert!(!spec.accepts("verbose"));
        assert!(ArgSpec::AcceptAll.accepts("anything"));
    }
}
