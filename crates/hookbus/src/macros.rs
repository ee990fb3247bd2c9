//! Marker macros for hook implementations, hook specifications, and
//! keyword-argument maps.

/// Marks a function as a hook implementation.
///
/// The declared parameter list is harvested as the implementation's
/// keyword parameters; dispatch passes only the matching subset and each
/// parameter is bound as `Option<&Value>`. The `**` form accepts the full
/// keyword set as a [`HookArgs`](crate::HookArgs). The body evaluates to
/// `PluginResult<Option<Value>>`; `Ok(None)` means "no value".
///
/// # Example
/// ```rust,ignore
/// let def = hookimpl!(fn normalize_path(path, strict) {
///     let path = path.and_then(|v| v.as_str()).unwrap_or(".");
///     Ok(Some(json!(path.trim_end_matches('/'))))
/// });
///
/// let audit = hookimpl!(fn on_event(**args) {
///     tracing::debug!(count = args.len(), "event");
///     Ok(None)
/// });
/// ```
///
/// An optional leading project tag is accepted and ignored at runtime:
/// `hookimpl!("myproject", fn normalize_path(path) { .. })`.
#[macro_export]
macro_rules! hookimpl {
    (fn $hook:ident ( ** $args:ident ) $body:block) => {
        $crate::HookImplDef::with_argspec(
            stringify!($hook),
            $crate::ArgSpec::AcceptAll,
            move |$args| -> $crate::PluginResult<::std::option::Option<$crate::Value>> {
                $body
            },
        )
    };
    (fn $hook:ident ( $($arg:ident),* $(,)? ) $body:block) => {
        $crate::HookImplDef::with_argspec(
            stringify!($hook),
            $crate::ArgSpec::from_names(&[$(stringify!($arg)),*]),
            move |__hookbus_args| -> $crate::PluginResult<::std::option::Option<$crate::Value>> {
                $(
                    #[allow(unused_variables)]
                    let $arg = __hookbus_args.get(stringify!($arg));
                )*
                $body
            },
        )
    };
    ($_project:literal, $($rest:tt)+) => {
        $crate::hookimpl!($($rest)+)
    };
}

/// Marks a hook specification.
///
/// Recognizes one option, `firstresult`: dispatch stops at the first
/// non-null result instead of collecting all results.
///
/// # Example
/// ```rust,ignore
/// manager.add_hookspecs(vec![
///     hookspec!(on_event),
///     hookspec!(normalize_path, firstresult),
/// ]);
/// ```
#[macro_export]
macro_rules! hookspec {
    ($name:ident) => {
        $crate::HookSpecDef::new(stringify!($name))
    };
    ($name:ident, firstresult) => {
        $crate::HookSpecDef::new(stringify!($name)).firstresult(true)
    };
    ($_project:literal, $($rest:tt)+) => {
        $crate::hookspec!($($rest)+)
    };
}

/// Builds a [`Kwargs`](crate::Kwargs) map.
///
/// # Example
/// ```rust,ignore
/// let kw = kwargs! {
///     "path" => json!("/srv/data"),
///     "strict" => json!(true),
/// };
/// ```
#[macro_export]
macro_rules! kwargs {
    () => {
        $crate::Kwargs::new()
    };
    ( $($key:expr => $value:expr),* $(,)? ) => {{
        let mut kw = $crate::Kwargs::new();
        $(
            kw.insert(($key).to_string(), $value);
        )*
        kw
    }};
}
