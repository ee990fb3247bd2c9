//! Entry-point loader — discovers installed plugin distributions and loads
//! the plugins they advertise.
//!
//! A plugins directory holds one JSON manifest per installed distribution:
//!
//! ```json
//! {
//!     "name": "acme-markdown",
//!     "version": "0.3.1",
//!     "entry_points": {
//!         "hookbus": [
//!             { "name": "markdown", "library": "libacme_markdown.so" }
//!         ]
//!     }
//! }
//! ```
//!
//! Library paths are resolved relative to the manifest's directory. The
//! advertised object is produced by the `hookbus_plugin_entry` symbol the
//! plugin exports (see the SDK's `export_plugin!`). Dynamic loading is
//! feature-gated behind `dynamic`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use hookbus_core::PluginResult;

/// Distribution metadata recorded for an externally loaded plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistInfo {
    /// Distribution (package) name.
    pub name: String,
    /// Distribution version.
    pub version: String,
}

/// One advertised entry point.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryPoint {
    /// The name the plugin will be registered under.
    pub name: String,
    /// Shared-library path, relative to the manifest's directory.
    pub library: String,
}

/// A distribution's advertisement of itself and its entry points.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    /// Distribution name.
    pub name: String,
    /// Distribution version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Entry points grouped by group name.
    #[serde(default)]
    pub entry_points: HashMap<String, Vec<EntryPoint>>,
}

impl PluginManifest {
    /// The distribution metadata this manifest describes.
    pub fn dist_info(&self) -> DistInfo {
        DistInfo {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }
}

fn default_version() -> String {
    "0.0.0".to_string()
}

/// Scans a plugins directory for distribution manifests.
///
/// A missing directory is empty, not an error. An unreadable or unparsable
/// manifest is skipped with a warning — discovery reports what it can.
pub fn discover_manifests(dir: &Path) -> PluginResult<Vec<(PathBuf, PluginManifest)>> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "Plugin directory does not exist");
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut manifests = Vec::new();
    for path in paths {
        let parsed = std::fs::read_to_string(&path)
            .map_err(hookbus_core::PluginError::from)
            .and_then(|text| Ok(serde_json::from_str::<PluginManifest>(&text)?));
        match parsed {
            Ok(manifest) => manifests.push((path, manifest)),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Skipping unreadable plugin manifest");
            }
        }
    }
    Ok(manifests)
}

/// An entry point selected for loading.
#[derive(Debug, Clone)]
pub struct PlannedEntry {
    /// The advertised registration name.
    pub entry_name: String,
    /// Absolute (manifest-relative, resolved) library path.
    pub library: PathBuf,
    /// The advertising distribution.
    pub dist: DistInfo,
}

/// Selects the entry points of `group` whose names are not already taken.
///
/// Pure planning step: group filtering and name-collision skipping, in
/// manifest order. Names claimed by entries loaded earlier in the same run
/// are re-checked by the loader just before each load.
pub fn plan_group(
    manifests: &[(PathBuf, PluginManifest)],
    group: &str,
    mut is_taken: impl FnMut(&str) -> bool,
) -> Vec<PlannedEntry> {
    let mut planned = Vec::new();
    for (path, manifest) in manifests {
        let Some(entries) = manifest.entry_points.get(group) else {
            continue;
        };
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for entry in entries {
            if is_taken(&entry.name) {
                debug!(entry = %entry.name, "Entry-point name already registered, skipping");
                continue;
            }
            planned.push(PlannedEntry {
                entry_name: entry.name.clone(),
                library: base.join(&entry.library),
                dist: manifest.dist_info(),
            });
        }
    }
    planned
}

#[cfg(feature = "dynamic")]
pub mod entry_point_loader {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use tracing::{info, warn};

    use hookbus_core::{PluginError, PluginResult};

    use super::{discover_manifests, plan_group};
    use crate::manager::PluginManager;
    use crate::plugin::Plugin;

    /// Type of the entry function exported by dynamic plugins.
    ///
    /// Dynamic plugins must export:
    /// `extern "C" fn hookbus_plugin_entry() -> *mut dyn Plugin`
    /// (see the SDK's `export_plugin!`).
    pub type PluginEntryFn = unsafe extern "C" fn() -> *mut dyn Plugin;

    /// Symbol name resolved in each plugin library.
    pub const PLUGIN_ENTRY_SYMBOL: &[u8] = b"hookbus_plugin_entry";

    /// Loads advertised plugins from shared libraries (.so / .dll / .dylib).
    pub struct EntryPointLoader {
        /// The plugins directory to scan.
        directory: PathBuf,
        /// Loaded libraries, kept alive for the lifetime of the loader.
        _libraries: Vec<libloading::Library>,
    }

    impl EntryPointLoader {
        /// Creates a loader over a plugins directory.
        pub fn new(directory: impl Into<PathBuf>) -> Self {
            Self {
                directory: directory.into(),
                _libraries: Vec::new(),
            }
        }

        /// Loads every advertised entry point of `group` not already
        /// registered, registering each under its advertised name and
        /// recording its distribution metadata.
        ///
        /// A load failure skips that entry point without touching manager
        /// state. Returns the number of newly loaded plugins.
        pub fn load_group(
            &mut self,
            manager: &mut PluginManager,
            group: &str,
        ) -> PluginResult<usize> {
            let manifests = discover_manifests(&self.directory)?;
            let planned = plan_group(&manifests, group, |name| {
                manager.get_plugin(name).is_some()
            });

            let mut count = 0;
            for entry in planned {
                // A distribution earlier in this run may have claimed the name.
                if manager.get_plugin(&entry.entry_name).is_some() {
                    continue;
                }
                // Safety: loads and runs arbitrary code from the configured
                // plugins directory. Only trusted directories belong there.
                let plugin = match unsafe { self.load_library(&entry.library) } {
                    Ok(plugin) => plugin,
                    Err(err) => {
                        warn!(
                            entry = %entry.entry_name,
                            library = %entry.library.display(),
                            error = %err,
                            "Skipping entry point that failed to load"
                        );
                        continue;
                    }
                };
                if manager
                    .register_with_name(Arc::clone(&plugin), &entry.entry_name)
                    .is_some()
                {
                    manager.record_distinfo(plugin, entry.dist.clone());
                    count += 1;
                    info!(
                        entry = %entry.entry_name,
                        dist = %entry.dist.name,
                        version = %entry.dist.version,
                        "Entry-point plugin loaded"
                    );
                }
            }
            Ok(count)
        }

        /// Loads one plugin library and resolves its entry symbol.
        ///
        /// # Safety
        /// Loads arbitrary code from a shared library. Only load trusted
        /// plugins.
        unsafe fn load_library(&mut self, path: &Path) -> PluginResult<Arc<dyn Plugin>> {
            let lib = unsafe { libloading::Library::new(path) }.map_err(|e| {
                PluginError::loader(format!(
                    "failed to load plugin library '{}': {e}",
                    path.display()
                ))
            })?;

            let entry: libloading::Symbol<'_, PluginEntryFn> =
                unsafe { lib.get(PLUGIN_ENTRY_SYMBOL) }.map_err(|e| {
                    PluginError::loader(format!(
                        "plugin '{}' missing entry symbol: {e}",
                        path.display()
                    ))
                })?;

            let raw = unsafe { entry() };
            let plugin = unsafe { Arc::from_raw(raw as *const dyn Plugin) };

            self._libraries.push(lib);
            Ok(plugin)
        }
    }

    impl std::fmt::Debug for EntryPointLoader {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("EntryPointLoader")
                .field("directory", &self.directory)
                .field("loaded_count", &self._libraries.len())
                .finish()
        }
    }
}

/// Stub loader when the `dynamic` feature is not enabled.
#[cfg(not(feature = "dynamic"))]
pub mod entry_point_loader {
    use std::path::PathBuf;

    /// Stub entry-point loader.
    #[derive(Debug)]
    pub struct EntryPointLoader {
        /// The plugins directory this loader would scan.
        directory: PathBuf,
    }

    impl EntryPointLoader {
        /// Creates a stub loader.
        pub fn new(directory: impl Into<PathBuf>) -> Self {
            Self {
                directory: directory.into(),
            }
        }

        /// The configured plugins directory.
        pub fn directory(&self) -> &PathBuf {
            &self.directory
        }
    }
}

pub use entry_point_loader::EntryPointLoader;
