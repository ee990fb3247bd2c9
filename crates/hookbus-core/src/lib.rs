//! # hookbus-core
//!
//! Core crate for Hookbus. Contains the unified error system, the shared
//! result alias, and the configuration schemas used by the host shell and
//! the entry-point loader.
//!
//! This crate has **no** internal dependencies on other Hookbus crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{ErrorKind, PluginError};
pub use result::PluginResult;
