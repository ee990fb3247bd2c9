//! Hook caller — owns the ordered implementation list for one hook name and
//! runs the dispatch algorithm.
//!
//! Implementations are stored in registration order and invoked in
//! **reverse**, so the most-recently-registered plugin runs first. A
//! `firstresult` hook stops at the first non-null result; a collect-all hook
//! invokes every implementation and gathers the non-null results in order.

use std::fmt;
use std::sync::{Arc, Weak};

use tracing::debug;

use hookbus_core::PluginResult;

use crate::hooks::args::{HookArgs, Kwargs};
use crate::inspect::ArgSpec;
use crate::plugin::{HookImplDef, Plugin};
use crate::Value;

/// The callable form of a hook implementation.
///
/// Returning `Ok(None)` means "no value" — the dispatcher skips it under
/// both policies. An `Err` propagates unchanged to the dispatch caller.
pub type HookFn =
    Arc<dyn Fn(&HookArgs<'_>) -> PluginResult<Option<Value>> + Send + Sync>;

/// One registered hook implementation, bound to its owning plugin.
///
/// Immutable after creation; removed when its plugin is unregistered. The
/// plugin back-reference is weak so the record never extends the plugin's
/// lifetime.
pub struct HookImpl {
    /// The callable.
    function: HookFn,
    /// Keyword parameters the callable accepts.
    argnames: ArgSpec,
    /// Non-owning back-reference to the plugin, for identity comparison.
    plugin: Weak<dyn Plugin>,
    /// The name the plugin was registered under.
    plugin_name: String,
}

impl HookImpl {
    pub(crate) fn new(def: HookImplDef, plugin: Weak<dyn Plugin>, plugin_name: String) -> Self {
        Self {
            function: def.function,
            argnames: def.argnames,
            plugin,
            plugin_name,
        }
    }

    /// The name of the plugin that owns this implementation.
    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    /// The owning plugin, if it is still alive.
    pub fn plugin(&self) -> Option<Arc<dyn Plugin>> {
        self.plugin.upgrade()
    }

    /// The keyword parameters this implementation accepts.
    pub fn argnames(&self) -> &ArgSpec {
        &self.argnames
    }

    /// Identity key of the owning plugin.
    pub(crate) fn owner_key(&self) -> usize {
        self.plugin.as_ptr() as *const () as usize
    }

    /// Invokes the implementation with the keyword subset it accepts.
    fn invoke(&self, hook: &str, kwargs: &Kwargs) -> PluginResult<Option<Value>> {
        match &self.argnames {
            ArgSpec::AcceptAll => (self.function)(&HookArgs::new(hook, kwargs)),
            ArgSpec::Named(_) => {
                let filtered = self.argnames.keyword_subset(kwargs);
                (self.function)(&HookArgs::new(hook, &filtered))
            }
        }
    }
}

impl fmt::Debug for HookImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookImpl")
            .field("plugin_name", &self.plugin_name)
            .field("argnames", &self.argnames)
            .finish()
    }
}

/// The outcome of dispatching one hook call.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// First-result policy: the first non-null result, or `None`.
    First(Option<Value>),
    /// Collect-all policy: every non-null result, in dispatch order.
    All(Vec<Value>),
}

impl DispatchOutcome {
    /// Unwraps a first-result outcome.
    ///
    /// # Panics
    /// Panics if the hook uses the collect-all policy.
    pub fn first(self) -> Option<Value> {
        match self {
            Self::First(value) => value,
            Self::All(_) => panic!("hook does not use the first-result policy"),
        }
    }

    /// Unwraps a collect-all outcome.
    ///
    /// # Panics
    /// Panics if the hook uses the first-result policy.
    pub fn all(self) -> Vec<Value> {
        match self {
            Self::All(values) => values,
            Self::First(_) => panic!("hook uses the first-result policy"),
        }
    }
}

/// Manages the implementations for a single hook and dispatches calls.
///
/// Created lazily by the manager — when a matching spec is registered or
/// when the first implementation arrives, whichever comes first. Never
/// destroyed during the manager's lifetime; an empty caller is harmless.
#[derive(Debug)]
pub struct HookCaller {
    /// The hook name.
    name: String,
    /// Whether dispatch stops at the first non-null result.
    firstresult: bool,
    /// Implementations in registration order.
    hookimpls: Vec<HookImpl>,
}

impl HookCaller {
    pub(crate) fn new(name: impl Into<String>, firstresult: bool) -> Self {
        Self {
            name: name.into(),
            firstresult,
            hookimpls: Vec::new(),
        }
    }

    /// The hook name this caller dispatches.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this hook uses the first-result policy.
    pub fn is_firstresult(&self) -> bool {
        self.firstresult
    }

    /// The registered implementations, in registration order.
    pub fn hookimpls(&self) -> &[HookImpl] {
        &self.hookimpls
    }

    pub(crate) fn set_firstresult(&mut self, firstresult: bool) {
        self.firstresult = firstresult;
    }

    pub(crate) fn add_hookimpl(&mut self, hookimpl: HookImpl) {
        self.hookimpls.push(hookimpl);
    }

    /// Removes every implementation owned by the plugin with this identity.
    pub(crate) fn remove_plugin(&mut self, owner_key: usize) {
        self.hookimpls.retain(|h| h.owner_key() != owner_key);
    }

    /// Dispatches a call to the registered implementations.
    ///
    /// Iterates in reverse registration order. Keyword arguments are
    /// filtered per implementation; an error from any implementation aborts
    /// dispatch and propagates unchanged. Mutating the implementation list
    /// during a call is unrepresentable: `call` holds the shared borrow
    /// while registration requires the exclusive one.
    pub fn call(&self, kwargs: &Kwargs) -> PluginResult<DispatchOutcome> {
        debug!(
            hook = %self.name,
            impls = self.hookimpls.len(),
            firstresult = self.firstresult,
            "Dispatching hook"
        );

        if self.firstresult {
            for hookimpl in self.hookimpls.iter().rev() {
                if let Some(value) = hookimpl.invoke(&self.name, kwargs)? {
                    return Ok(DispatchOutcome::First(Some(value)));
                }
            }
            return Ok(DispatchOutcome::First(None));
        }

        let mut results = Vec::new();
        for hookimpl in self.hookimpls.iter().rev() {
            if let Some(value) = hookimpl.invoke(&self.name, kwargs)? {
                results.push(value);
            }
        }
        Ok(DispatchOutcome::All(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::PluginBuilder;
    use serde_json::json;

    fn impl_returning(hook: &str, value: Value) -> HookImplDef {
        HookImplDef::accept_all(hook, move |_| Ok(Some(value.clone())))
    }

    fn caller_with(
        firstresult: bool,
        defs: Vec<HookImplDef>,
    ) -> (HookCaller, Vec<Arc<dyn Plugin>>) {
        let mut caller = HookCaller::new("h", firstresult);
        let mut plugins: Vec<Arc<dyn Plugin>> = Vec::new();
        for (i, def) in defs.into_iter().enumerate() {
            let plugin = PluginBuilder::named(format!("p{i}")).build();
            let plugin: Arc<dyn Plugin> = plugin;
            caller.add_hookimpl(HookImpl::new(
                def,
                Arc::downgrade(&plugin),
                format!("p{i}"),
            ));
            plugins.push(plugin);
        }
        (caller, plugins)
    }

    #[test]
    fn test_collect_all_reverse_registration_order() {
        let (caller, _plugins) = caller_with(
            false,
            vec![
                impl_returning("h", json!("a")),
                impl_returning("h", json!("b")),
                impl_returning("h", json!("c")),
            ],
        );
        let results = caller.call(&Kwargs::new()).unwrap().all();
        assert_eq!(results, vec![json!("c"), json!("b"), json!("a")]);
    }

    #[test]
    fn test_firstresult_short_circuits() {
        let (caller, _plugins) = caller_with(
            true,
            vec![
                impl_returning("h", json!("a")),
                HookImplDef::accept_all("h", |_| Ok(None)),
                impl_returning("h", json!("c")),
            ],
        );
        // Last-registered runs first; its non-null result wins.
        let result = caller.call(&Kwargs::new()).unwrap().first();
        assert_eq!(result, Some(json!("c")));
    }

    #[test]
    fn test_firstresult_skips_nulls() {
        let (caller, _plugins) = caller_with(
            true,
            vec![
                impl_returning("h", json!("a")),
                HookImplDef::accept_all("h", |_| Ok(None)),
            ],
        );
        let result = caller.call(&Kwargs::new()).unwrap().first();
        assert_eq!(result, Some(json!("a")));
    }

    #[test]
    fn test_empty_dispatch_is_not_an_error() {
        let empty = HookCaller::new("h", false);
        assert_eq!(empty.call(&Kwargs::new()).unwrap().all(), Vec::<Value>::new());

        let empty_first = HookCaller::new("h", true);
        assert_eq!(empty_first.call(&Kwargs::new()).unwrap().first(), None);
    }

    #[test]
    fn test_implementation_error_propagates() {
        let (caller, _plugins) = caller_with(
            false,
            vec![HookImplDef::accept_all("h", |_| {
                Err(hookbus_core::PluginError::implementation("boom"))
            })],
        );
        let err = caller.call(&Kwargs::new()).unwrap_err();
        assert_eq!(err.kind, hookbus_core::ErrorKind::Implementation);
    }

    #[test]
    fn test_argument_filtering_per_implementation() {
        let mut caller = HookCaller::new("h", false);
        let plugin: Arc<dyn Plugin> = PluginBuilder::named("p").build();

        // Declares only `x`: must not see `y`.
        caller.add_hookimpl(HookImpl::new(
            HookImplDef::new("h", &["x"], |args| {
                assert!(args.get("y").is_none());
                Ok(Some(json!(args.len())))
            }),
            Arc::downgrade(&plugin),
            "p".to_string(),
        ));
        // Accepts everything: sees both.
        caller.add_hookimpl(HookImpl::new(
            HookImplDef::accept_all("h", |args| Ok(Some(json!(args.len())))),
            Arc::downgrade(&plugin),
            "p".to_string(),
        ));

        let mut kwargs = Kwargs::new();
        kwargs.insert("x".to_string(), json!(1));
        kwargs.insert("y".to_string(), json!(2));

        let results = caller.call(&kwargs).unwrap().all();
        assert_eq!(results, vec![json!(2), json!(1)]);
    }

    #[test]
    fn test_remove_plugin_retains_others() {
        let (mut caller, plugins) = caller_with(
            false,
            vec![
                impl_returning("h", json!("a")),
                impl_returning("h", json!("b")),
                impl_returning("h", json!("c")),
            ],
        );
        let key = crate::plugin::plugin_key(&*plugins[1]);
        caller.remove_plugin(key);

        let results = caller.call(&Kwargs::new()).unwrap().all();
        assert_eq!(results, vec![json!("c"), json!("a")]);
    }
}
