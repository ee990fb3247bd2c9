//! # hookbus-sdk
//!
//! SDK for developing Hookbus plugins.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hookbus_sdk::prelude::*;
//! use serde_json::json;
//!
//! #[derive(Debug)]
//! struct LintPlugin;
//!
//! impl Plugin for LintPlugin {
//!     fn declared_name(&self) -> Option<&str> {
//!         Some("lint")
//!     }
//!
//!     fn hook_impls(&self) -> Vec<HookImplDef> {
//!         vec![
//!             hookimpl!(fn normalize_source(path, text) {
//!                 let text = text.and_then(|v| v.as_str()).unwrap_or("");
//!                 Ok(Some(json!(text.trim())))
//!             }),
//!             hookimpl!(fn on_event(**args) {
//!                 tracing::debug!(count = args.len(), "event observed");
//!                 Ok(None)
//!             }),
//!         ]
//!     }
//! }
//!
//! // For plugins compiled as `cdylib` and discovered through a manifest:
//! export_plugin!(LintPlugin);
//! ```
//!
//! Plugins without a bespoke type can use [`PluginBuilder`](hookbus::PluginBuilder)
//! instead of implementing [`Plugin`](hookbus::Plugin) by hand.

pub mod exports;

/// Prelude for convenient imports.
pub mod prelude {
    pub use hookbus::{
        hookimpl, hookspec, kwargs, ArgSpec, DispatchOutcome, DistInfo, HookArgs, HookImplDef,
        HookSpecDef, Kwargs, Plugin, PluginBuilder, PluginError, PluginManager, PluginResult,
        Value,
    };
}
