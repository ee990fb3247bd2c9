//! Hook relay — the namespace exposing every known hook name as an
//! invocable caller.

use indexmap::IndexMap;

use hookbus_core::{PluginError, PluginResult};

use crate::hooks::args::Kwargs;
use crate::hooks::caller::{DispatchOutcome, HookCaller};

/// Namespace mapping hook names to their [`HookCaller`]s.
///
/// The explicit-registry rendering of `manager.hook.<name>(...)`: look up a
/// caller by name, or dispatch in one step with [`HookRelay::call`].
#[derive(Debug, Default)]
pub struct HookRelay {
    /// Hook name → caller, in creation order.
    hooks: IndexMap<String, HookCaller>,
}

impl HookRelay {
    pub(crate) fn new() -> Self {
        Self {
            hooks: IndexMap::new(),
        }
    }

    /// Looks up the caller for a hook name.
    pub fn caller(&self, name: &str) -> Option<&HookCaller> {
        self.hooks.get(name)
    }

    /// The known hook names, in creation order.
    pub fn hook_names(&self) -> impl Iterator<Item = &str> {
        self.hooks.keys().map(String::as_str)
    }

    /// Dispatches a hook by name.
    ///
    /// A hook that exists but has zero implementations returns its empty
    /// outcome; a name that was never declared nor implemented is an
    /// [`UnknownHook`](hookbus_core::ErrorKind::UnknownHook) error.
    pub fn call(&self, name: &str, kwargs: &Kwargs) -> PluginResult<DispatchOutcome> {
        match self.hooks.get(name) {
            Some(caller) => caller.call(kwargs),
            None => Err(PluginError::unknown_hook(name)),
        }
    }

    /// Finds or creates the caller for a hook name.
    ///
    /// Callers created here default to the collect-all policy until a spec
    /// says otherwise.
    pub(crate) fn ensure_caller(&mut self, name: &str) -> &mut HookCaller {
        self.hooks
            .entry(name.to_string())
            .or_insert_with(|| HookCaller::new(name, false))
    }

    pub(crate) fn callers_mut(&mut self) -> impl Iterator<Item = &mut HookCaller> {
        self.hooks.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookbus_core::ErrorKind;

    #[test]
    fn test_unknown_hook_is_an_error() {
        let relay = HookRelay::new();
        let err = relay.call("never_declared", &Kwargs::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownHook);
    }

    #[test]
    fn test_ensure_caller_is_idempotent() {
        let mut relay = HookRelay::new();
        relay.ensure_caller("h").set_firstresult(true);
        relay.ensure_caller("h");
        assert!(relay.caller("h").unwrap().is_firstresult());
        assert_eq!(relay.hook_names().count(), 1);
    }
}
