//! Export helpers for plugins compiled as shared libraries.

/// Exports a plugin from a `cdylib` crate.
///
/// Emits the `hookbus_plugin_entry` symbol the entry-point loader resolves.
/// The expression is evaluated once per call and handed to the host as an
/// `Arc<dyn Plugin>`; the host keeps the library loaded for the lifetime of
/// its loader.
///
/// # Example
/// ```rust,ignore
/// export_plugin!(LintPlugin);
/// ```
#[macro_export]
macro_rules! export_plugin {
    ($plugin:expr) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn hookbus_plugin_entry() -> *mut dyn $crate::prelude::Plugin {
            let plugin: ::std::sync::Arc<dyn $crate::prelude::Plugin> =
                ::std::sync::Arc::new($plugin);
            ::std::sync::Arc::into_raw(plugin) as *mut dyn $crate::prelude::Plugin
        }
    };
}
