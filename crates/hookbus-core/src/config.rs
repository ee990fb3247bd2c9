//! Application configuration schemas.
//!
//! Configuration is deserialized from TOML files via the `config` crate,
//! merged with environment variables prefixed with `HOOKBUS`.

use serde::{Deserialize, Serialize};

use crate::error::PluginError;

/// Root host configuration.
///
/// Top-level deserialization target for the merged TOML configuration files
/// (default.toml + environment overlay). Every section has serde defaults so
/// the host runs with no configuration files present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Entry-point loader settings.
    #[serde(default)]
    pub loader: LoaderConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Entry-point loader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Directory containing plugin manifests and shared libraries.
    #[serde(default = "default_plugin_directory")]
    pub directory: String,
    /// Entry-point group to load on startup.
    #[serde(default = "default_group")]
    pub group: String,
    /// Whether to automatically load plugins on startup.
    #[serde(default = "default_true")]
    pub auto_load: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            directory: default_plugin_directory(),
            group: default_group(),
            auto_load: default_true(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "hookbus=debug").
    #[serde(default = "default_level")]
    pub level: String,
    /// Output format: "pretty" or "json".
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `HOOKBUS`.
    pub fn load(env: &str) -> Result<Self, PluginError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HOOKBUS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

fn default_plugin_directory() -> String {
    "./plugins".to_string()
}

fn default_group() -> String {
    "hookbus".to_string()
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.loader.directory, "./plugins");
        assert_eq!(config.loader.group, "hookbus");
        assert!(config.loader.auto_load);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_empty_toml_deserializes_with_defaults() {
        let config: AppConfig = toml_from_str("");
        assert_eq!(config.loader.group, "hookbus");
    }

    fn toml_from_str(s: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
