//! Hookbus host shell.
//!
//! Minimal host wiring the framework together: loads configuration,
//! initializes logging, loads entry-point plugins from the configured
//! directory, and fires the conventional startup hooks.

use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

use hookbus::{hookspec, kwargs, EntryPointLoader, PluginManager};
use hookbus_core::config::AppConfig;
use hookbus_core::PluginResult;

fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config) {
        tracing::error!("Host error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> PluginResult<AppConfig> {
    let env = std::env::var("HOOKBUS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main host run function
fn run(config: AppConfig) -> PluginResult<()> {
    tracing::info!("Starting hookbus-host v{}", env!("CARGO_PKG_VERSION"));

    let mut manager = PluginManager::for_project("hookbus");
    manager.add_hookspecs(vec![
        hookspec!(host_banner, firstresult),
        hookspec!(host_startup),
    ]);

    if config.loader.auto_load {
        let mut loader = EntryPointLoader::new(&config.loader.directory);
        let loaded = loader.load_group(&mut manager, &config.loader.group)?;
        tracing::info!(loaded, group = %config.loader.group, "Entry-point plugins loaded");
    }

    for (name, _) in manager.list_name_plugin() {
        tracing::info!(plugin = %name, "Registered plugin");
    }
    for (_, dist) in manager.list_plugin_distinfo() {
        tracing::info!(dist = %dist.name, version = %dist.version, "Plugin distribution");
    }

    let startup_args = kwargs! {
        "host" => json!("hookbus-host"),
        "version" => json!(env!("CARGO_PKG_VERSION")),
    };

    if let Some(banner) = manager.hook().call("host_banner", &startup_args)?.first() {
        tracing::info!(banner = %banner, "Plugin banner");
    }

    let acks = manager.hook().call("host_startup", &startup_args)?.all();
    tracing::info!(acks = acks.len(), "Startup hook dispatched");

    Ok(())
}
