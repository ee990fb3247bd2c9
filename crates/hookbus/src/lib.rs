//! # hookbus
//!
//! Hook-based plugin dispatch framework. Provides:
//!
//! - Marker macros declaring hook implementations and hook specifications
//! - Hook callers with reverse-registration-order dispatch and a
//!   first-result or collect-all policy per hook
//! - A plugin manager with identity-based registration and unregistration
//! - Entry-point loading from installed plugin distributions via
//!   `libloading` (feature `dynamic`)
//!
//! Dispatch is single-threaded and synchronous: mutators take `&mut`
//! [`PluginManager`], dispatch borrows it shared, and the two cannot
//! overlap.

pub mod hooks;
pub mod inspect;
pub mod loader;
mod macros;
pub mod manager;
pub mod plugin;

pub use serde_json::Value;

pub use hookbus_core::{ErrorKind, PluginError, PluginResult};

pub use hooks::args::{HookArgs, Kwargs};
pub use hooks::caller::{DispatchOutcome, HookCaller, HookFn, HookImpl};
pub use hooks::relay::HookRelay;
pub use inspect::ArgSpec;
pub use loader::{DistInfo, EntryPointLoader, PluginManifest};
pub use manager::PluginManager;
pub use plugin::{BuiltPlugin, HookImplDef, HookSpecDef, Plugin, PluginBuilder};
