//! Convenience result type alias for Hookbus.

use crate::error::PluginError;

/// A specialized `Result` type for Hookbus operations.
///
/// Defined as a convenience so that every crate does not need to write
/// `Result<T, PluginError>` explicitly.
pub type PluginResult<T> = Result<T, PluginError>;
