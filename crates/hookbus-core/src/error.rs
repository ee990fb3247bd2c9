//! Unified error types for Hookbus.
//!
//! All crates map their internal errors into [`PluginError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A hook name was dispatched that no spec or implementation ever declared.
    UnknownHook,
    /// A hook implementation required an argument the host did not supply.
    MissingArgument,
    /// A hook implementation failed; surfaced unchanged to the dispatch caller.
    Implementation,
    /// An entry-point load or manifest read failed.
    Loader,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An I/O error occurred.
    Io,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownHook => write!(f, "UNKNOWN_HOOK"),
            Self::MissingArgument => write!(f, "MISSING_ARGUMENT"),
            Self::Implementation => write!(f, "IMPLEMENTATION"),
            Self::Loader => write!(f, "LOADER"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Io => write!(f, "IO"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout Hookbus.
///
/// Crate-specific failures are mapped into `PluginError` using `From` impls
/// or explicit `.map_err()` calls, giving a single error type at the
/// framework boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct PluginError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PluginError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an unknown-hook error.
    pub fn unknown_hook(name: impl fmt::Display) -> Self {
        Self::new(ErrorKind::UnknownHook, format!("no hook named '{name}'"))
    }

    /// Create a missing-argument error.
    pub fn missing_argument(hook: impl fmt::Display, arg: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::MissingArgument,
            format!("hook '{hook}' requires argument '{arg}'"),
        )
    }

    /// Create an implementation error.
    pub fn implementation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Implementation, message)
    }

    /// Create a loader error.
    pub fn loader(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Loader, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for PluginError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for PluginError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for PluginError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for PluginError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
