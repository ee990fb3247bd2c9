//! End-to-end dispatch behavior through the manager and relay.

use serde_json::json;

use hookbus::{hookimpl, hookspec, kwargs, PluginBuilder, PluginManager, Value};

fn returning(hook: &str, value: Value) -> hookbus::HookImplDef {
    hookbus::HookImplDef::accept_all(hook, move |_| Ok(Some(value.clone())))
}

#[test]
fn collect_all_returns_reverse_registration_order() {
    let mut manager = PluginManager::new();
    for (name, value) in [("a", json!("A")), ("b", json!("B")), ("c", json!("C"))] {
        manager.register(
            PluginBuilder::named(name)
                .hook(returning("render", value))
                .build(),
        );
    }

    let results = manager
        .hook()
        .call("render", &kwargs!())
        .unwrap()
        .all();
    assert_eq!(results, vec![json!("C"), json!("B"), json!("A")]);
}

#[test]
fn firstresult_returns_latest_registration() {
    let mut manager = PluginManager::new();
    manager.add_hookspecs(vec![hookspec!(resolve, firstresult)]);

    manager.register(
        PluginBuilder::named("a")
            .hook(returning("resolve", json!("from-a")))
            .build(),
    );
    manager.register(
        PluginBuilder::named("b")
            .hook(returning("resolve", json!("from-b")))
            .build(),
    );

    let result = manager.hook().call("resolve", &kwargs!()).unwrap().first();
    assert_eq!(result, Some(json!("from-b")));
}

#[test]
fn firstresult_skips_null_results() {
    let mut manager = PluginManager::new();
    manager.add_hookspecs(vec![hookspec!(resolve, firstresult)]);

    manager.register(
        PluginBuilder::named("a")
            .hook(returning("resolve", json!("from-a")))
            .build(),
    );
    manager.register(
        PluginBuilder::named("b")
            .hook(hookimpl!(fn resolve(**args) {
                let _ = args;
                Ok(None)
            }))
            .build(),
    );

    let result = manager.hook().call("resolve", &kwargs!()).unwrap().first();
    assert_eq!(result, Some(json!("from-a")));
}

#[test]
fn argument_filtering_respects_declared_parameters() {
    let mut manager = PluginManager::new();
    manager.register(
        PluginBuilder::named("narrow")
            .hook(hookimpl!(fn observe(x) {
                // Declared `(x)` only: `y` must not arrive.
                Ok(Some(json!({
                    "x": x.cloned(),
                    "seen": 1,
                })))
            }))
            .build(),
    );
    manager.register(
        PluginBuilder::named("wide")
            .hook(hookimpl!(fn observe(**args) {
                Ok(Some(json!({
                    "x": args.get("x").cloned(),
                    "seen": args.len(),
                })))
            }))
            .build(),
    );

    let results = manager
        .hook()
        .call("observe", &kwargs! { "x" => json!(1), "y" => json!(2) })
        .unwrap()
        .all();

    // Reverse registration order: "wide" first.
    assert_eq!(results[0], json!({ "x": 1, "seen": 2 }));
    assert_eq!(results[1], json!({ "x": 1, "seen": 1 }));
}

#[test]
fn missing_arguments_are_omitted_not_errors() {
    let mut manager = PluginManager::new();
    manager.register(
        PluginBuilder::named("p")
            .hook(hookimpl!(fn observe(x, z) {
                assert!(z.is_none());
                Ok(x.cloned())
            }))
            .build(),
    );

    let results = manager
        .hook()
        .call("observe", &kwargs! { "x" => json!(7) })
        .unwrap()
        .all();
    assert_eq!(results, vec![json!(7)]);
}

#[test]
fn spec_after_implementations_applies_retroactively() {
    let mut manager = PluginManager::new();
    manager.register(
        PluginBuilder::named("a")
            .hook(returning("pick", json!("A")))
            .build(),
    );
    manager.register(
        PluginBuilder::named("b")
            .hook(returning("pick", json!("B")))
            .build(),
    );

    // No spec yet: defaults to collect-all.
    assert_eq!(
        manager.hook().call("pick", &kwargs!()).unwrap().all().len(),
        2
    );

    manager.add_hookspecs(vec![hookspec!(pick, firstresult)]);
    let result = manager.hook().call("pick", &kwargs!()).unwrap().first();
    assert_eq!(result, Some(json!("B")));
}

#[test]
fn empty_dispatch_returns_empty_outcomes() {
    let mut manager = PluginManager::new();
    manager.add_hookspecs(vec![hookspec!(collect_all), hookspec!(pick_one, firstresult)]);

    assert!(manager
        .hook()
        .call("collect_all", &kwargs!())
        .unwrap()
        .all()
        .is_empty());
    assert_eq!(
        manager.hook().call("pick_one", &kwargs!()).unwrap().first(),
        None
    );
}

#[test]
fn undeclared_hook_name_is_an_error() {
    let manager = PluginManager::new();
    let err = manager.hook().call("no_such_hook", &kwargs!()).unwrap_err();
    assert_eq!(err.kind, hookbus::ErrorKind::UnknownHook);
}

#[test]
fn implementation_errors_propagate_to_dispatch_caller() {
    let mut manager = PluginManager::new();
    manager.register(
        PluginBuilder::named("fragile")
            .hook(hookimpl!(fn observe(**args) {
                let _ = args;
                Err(hookbus::PluginError::implementation("intentional failure"))
            }))
            .build(),
    );

    let err = manager.hook().call("observe", &kwargs!()).unwrap_err();
    assert_eq!(err.kind, hookbus::ErrorKind::Implementation);
    assert!(err.message.contains("intentional failure"));
}

#[test]
fn required_argument_error_carries_hook_and_name() {
    let mut manager = PluginManager::new();
    manager.register(
        PluginBuilder::named("strict")
            .hook(hookimpl!(fn observe(**args) {
                args.required("path")?;
                Ok(None)
            }))
            .build(),
    );

    let err = manager.hook().call("observe", &kwargs!()).unwrap_err();
    assert_eq!(err.kind, hookbus::ErrorKind::MissingArgument);
    assert!(err.message.contains("observe"));
    assert!(err.message.contains("path"));
}
