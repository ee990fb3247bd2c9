//! Plugin manager — identity tracking, hook-spec registration, and
//! registration/unregistration orchestration.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::hooks::caller::HookImpl;
use crate::hooks::relay::HookRelay;
use crate::loader::DistInfo;
use crate::plugin::{plugin_key, HookSpecDef, Plugin};

/// Registers plugins, manages hook specs, and exposes the dispatch relay.
///
/// Application-scoped: created once by the host and kept for its lifetime,
/// while individual plugins attach and detach dynamically. All mutators take
/// `&mut self`; dispatch goes through the shared [`HookRelay`] borrow, so
/// dispatch-while-mutating cannot compile.
#[derive(Debug)]
pub struct PluginManager {
    /// Host project tag, for log attribution only.
    project_name: Option<String>,
    /// The dispatch namespace.
    relay: HookRelay,
    /// Plugin name → plugin, in registration order. Names are unique.
    name_to_plugin: IndexMap<String, Arc<dyn Plugin>>,
    /// Plugin identity → registered name. Identities are unique.
    plugin_names: HashMap<usize, String>,
    /// Externally loaded plugins with their distribution metadata.
    distinfo: Vec<(Arc<dyn Plugin>, DistInfo)>,
}

impl PluginManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self {
            project_name: None,
            relay: HookRelay::new(),
            name_to_plugin: IndexMap::new(),
            plugin_names: HashMap::new(),
            distinfo: Vec::new(),
        }
    }

    /// Creates an empty manager tagged with a host project name.
    pub fn for_project(project_name: impl Into<String>) -> Self {
        let mut manager = Self::new();
        manager.project_name = Some(project_name.into());
        debug!(project = %manager.project_name.as_deref().unwrap_or(""), "Plugin manager created");
        manager
    }

    /// The host project tag, if one was set.
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// The dispatch namespace: `manager.hook().call(name, &kwargs)`.
    pub fn hook(&self) -> &HookRelay {
        &self.relay
    }

    /// Registers a plugin under its declared name, falling back to its type
    /// name.
    ///
    /// Returns the resolved name, or `None` if this plugin object (by
    /// identity) is already registered — a silent no-op, not an error.
    pub fn register<P: Plugin + 'static>(&mut self, plugin: Arc<P>) -> Option<String> {
        let fallback = short_type_name::<P>();
        let plugin: Arc<dyn Plugin> = plugin;
        self.register_inner(plugin, None, fallback)
    }

    /// Registers a plugin under an explicit name.
    pub fn register_as<P: Plugin + 'static>(
        &mut self,
        plugin: Arc<P>,
        name: impl Into<String>,
    ) -> Option<String> {
        let fallback = short_type_name::<P>();
        let plugin: Arc<dyn Plugin> = plugin;
        self.register_inner(plugin, Some(name.into()), fallback)
    }

    /// Registers an already type-erased plugin under an explicit name.
    ///
    /// This is the path the entry-point loader uses: dynamically loaded
    /// plugins arrive as `Arc<dyn Plugin>` and are always named by their
    /// advertised entry point.
    pub fn register_with_name(
        &mut self,
        plugin: Arc<dyn Plugin>,
        name: impl Into<String>,
    ) -> Option<String> {
        self.register_inner(plugin, Some(name.into()), "plugin")
    }

    fn register_inner(
        &mut self,
        plugin: Arc<dyn Plugin>,
        name: Option<String>,
        fallback: &str,
    ) -> Option<String> {
        let key = plugin_key(&*plugin);
        if self.plugin_names.contains_key(&key) {
            return None;
        }

        let plugin_name = name
            .or_else(|| plugin.declared_name().map(str::to_string))
            .unwrap_or_else(|| fallback.to_string());

        self.name_to_plugin
            .insert(plugin_name.clone(), Arc::clone(&plugin));
        self.plugin_names.insert(key, plugin_name.clone());

        // Wire the marked implementations, first occurrence of a hook name
        // winning.
        let mut seen = HashSet::new();
        let mut wired = 0usize;
        for def in plugin.hook_impls() {
            if !seen.insert(def.hook.clone()) {
                continue;
            }
            let hook = def.hook.clone();
            self.relay.ensure_caller(&hook).add_hookimpl(HookImpl::new(
                def,
                Arc::downgrade(&plugin),
                plugin_name.clone(),
            ));
            wired += 1;
        }

        info!(plugin = %plugin_name, hooks = wired, "Plugin registered");
        Some(plugin_name)
    }

    /// Unregisters a plugin by identity.
    ///
    /// Removes its name and identity bindings and every hook implementation
    /// it owns. Returns the plugin — ownership goes back to the caller; the
    /// manager holds no further strong references. An unknown plugin is a
    /// silent no-op returning `None`.
    pub fn unregister(&mut self, plugin: &dyn Plugin) -> Option<Arc<dyn Plugin>> {
        let key = plugin_key(plugin);
        let name = self.plugin_names.remove(&key)?;

        // The name binding may meanwhile point at a different plugin that
        // re-registered under the same name; only remove it if it is ours.
        let removed = match self.name_to_plugin.get(&name) {
            Some(existing) if plugin_key(&**existing) == key => {
                self.name_to_plugin.shift_remove(&name)
            }
            _ => None,
        };

        for caller in self.relay.callers_mut() {
            caller.remove_plugin(key);
        }

        info!(plugin = %name, "Plugin unregistered");
        removed
    }

    /// Unregisters a plugin by registered name.
    pub fn unregister_named(&mut self, name: &str) -> Option<Arc<dyn Plugin>> {
        let plugin = self.name_to_plugin.get(name).cloned()?;
        self.unregister(&*plugin)
    }

    /// Whether this plugin object (by identity) is currently registered.
    pub fn is_registered(&self, plugin: &dyn Plugin) -> bool {
        self.plugin_names.contains_key(&plugin_key(plugin))
    }

    /// Looks up a registered plugin by name.
    pub fn get_plugin(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.name_to_plugin.get(name).cloned()
    }

    /// Declares hook specifications.
    ///
    /// Each spec finds or creates its hook's caller and sets the caller's
    /// result policy, overwriting any policy the caller already had — a spec
    /// declared after implementations were registered applies retroactively.
    pub fn add_hookspecs(&mut self, specs: impl IntoIterator<Item = HookSpecDef>) {
        for spec in specs {
            self.relay
                .ensure_caller(&spec.name)
                .set_firstresult(spec.firstresult);
            debug!(hook = %spec.name, firstresult = spec.firstresult, "Hook spec registered");
        }
    }

    /// All registered (name, plugin) pairs, in registration order.
    pub fn list_name_plugin(&self) -> Vec<(String, Arc<dyn Plugin>)> {
        self.name_to_plugin
            .iter()
            .map(|(name, plugin)| (name.clone(), Arc::clone(plugin)))
            .collect()
    }

    /// All externally loaded plugins with their distribution metadata, in
    /// load order.
    pub fn list_plugin_distinfo(&self) -> Vec<(Arc<dyn Plugin>, DistInfo)> {
        self.distinfo
            .iter()
            .map(|(plugin, dist)| (Arc::clone(plugin), dist.clone()))
            .collect()
    }

    /// Records the distribution a loaded plugin came from.
    pub fn record_distinfo(&mut self, plugin: Arc<dyn Plugin>, dist: DistInfo) {
        self.distinfo.push((plugin, dist));
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Last path segment of a type name, used as the registration fallback.
fn short_type_name<P>() -> &'static str {
    let full = std::any::type_name::<P>();
    full.rsplit("::").next().unwrap_or(full)
}
