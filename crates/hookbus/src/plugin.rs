//! Plugin trait, declaration-time markers, and the anonymous plugin builder.

use std::fmt;
use std::sync::Arc;

use crate::hooks::args::HookArgs;
use crate::hooks::caller::HookFn;
use crate::inspect::ArgSpec;
use crate::Value;

use hookbus_core::PluginResult;

/// Trait that all plugins implement.
///
/// A plugin is any object carrying marked hook implementations. The marked
/// set is returned by [`Plugin::hook_impls`] — the explicit registration
/// list that stands in for runtime member scanning.
pub trait Plugin: Send + Sync + fmt::Debug {
    /// The name the plugin declares for itself.
    ///
    /// When absent, the manager falls back to the plugin's type name.
    fn declared_name(&self) -> Option<&str> {
        None
    }

    /// The hook implementations this plugin contributes.
    ///
    /// Each entry binds a callable to the hook whose name it carries. When
    /// the list names the same hook more than once, the first occurrence
    /// wins, matching method-resolution precedence.
    fn hook_impls(&self) -> Vec<HookImplDef>;
}

/// Stable identity key for a registered plugin object.
///
/// Identity is the plugin allocation's data pointer, never equality.
pub(crate) fn plugin_key(plugin: &dyn Plugin) -> usize {
    plugin as *const dyn Plugin as *const () as usize
}

/// Declaration-time marker binding one callable to a hook name.
///
/// Built by the [`hookimpl!`](crate::hookimpl) macro, which harvests the
/// declared parameter list, or by the explicit constructors below. The hook
/// name is the declared function's own name — names are matched by
/// identity, not by separate declaration.
#[derive(Clone)]
pub struct HookImplDef {
    /// The hook this callable implements.
    pub hook: String,
    /// The keyword parameters the callable accepts.
    pub argnames: ArgSpec,
    /// The callable itself.
    pub function: HookFn,
}

impl HookImplDef {
    /// Marks a callable accepting the named keyword parameters.
    pub fn new<F>(hook: impl Into<String>, argnames: &[&str], function: F) -> Self
    where
        F: Fn(&HookArgs<'_>) -> PluginResult<Option<Value>> + Send + Sync + 'static,
    {
        Self::with_argspec(hook, ArgSpec::from_names(argnames), function)
    }

    /// Marks a callable accepting arbitrary keyword arguments.
    pub fn accept_all<F>(hook: impl Into<String>, function: F) -> Self
    where
        F: Fn(&HookArgs<'_>) -> PluginResult<Option<Value>> + Send + Sync + 'static,
    {
        Self::with_argspec(hook, ArgSpec::AcceptAll, function)
    }

    /// Marks a callable with an explicit [`ArgSpec`].
    pub fn with_argspec<F>(hook: impl Into<String>, argnames: ArgSpec, function: F) -> Self
    where
        F: Fn(&HookArgs<'_>) -> PluginResult<Option<Value>> + Send + Sync + 'static,
    {
        Self {
            hook: hook.into(),
            argnames,
            function: Arc::new(function),
        }
    }
}

impl fmt::Debug for HookImplDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookImplDef")
            .field("hook", &self.hook)
            .field("argnames", &self.argnames)
            .field("function", &"<fn>")
            .finish()
    }
}

/// Declaration-time marker for a hook specification.
///
/// Declares the existence and result-combination policy of a hook,
/// independent of whether any implementation exists yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSpecDef {
    /// The hook name.
    pub name: String,
    /// Whether dispatch stops at the first non-null result.
    pub firstresult: bool,
}

impl HookSpecDef {
    /// Declares a collect-all hook.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            firstresult: false,
        }
    }

    /// Sets the first-result policy.
    pub fn firstresult(mut self, value: bool) -> Self {
        self.firstresult = value;
        self
    }
}

/// Builder assembling a plugin from marked implementations without a
/// bespoke type.
#[derive(Debug, Default)]
pub struct PluginBuilder {
    /// Declared plugin name, if any.
    name: Option<String>,
    /// Accumulated implementations.
    impls: Vec<HookImplDef>,
}

impl PluginBuilder {
    /// Creates a builder for an anonymous plugin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for a plugin with a declared name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            impls: Vec::new(),
        }
    }

    /// Adds a hook implementation.
    pub fn hook(mut self, def: HookImplDef) -> Self {
        self.impls.push(def);
        self
    }

    /// Builds the final plugin.
    pub fn build(self) -> Arc<BuiltPlugin> {
        Arc::new(BuiltPlugin {
            name: self.name,
            impls: self.impls,
        })
    }
}

/// A plugin assembled by [`PluginBuilder`].
#[derive(Debug)]
pub struct BuiltPlugin {
    name: Option<String>,
    impls: Vec<HookImplDef>,
}

impl Plugin for BuiltPlugin {
    fn declared_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn hook_impls(&self) -> Vec<HookImplDef> {
        self.impls.clone()
    }
}
