//! Reload pipeline: load from disk, swap the live table, reject bad updates.

use std::fs;
use std::path::PathBuf;

use nav_router::config::loader::{load_config, ConfigError};
use nav_router::routing::router::Router;

const INITIAL: &str = r#"
[[routes]]
path = "all"
handler = "list-view"

[[routes]]
path = "create"
handler = "add-view"

[[routes]]
path = ""
redirect_to = "all"

[[routes]]
path = "**"
handler = "list-view"

[[handlers]]
name = "list-view"
description = "Record listing view"

[[handlers]]
name = "add-view"
description = "Record creation view"
"#;

// Same handlers, but unknown paths now land on the create view.
const UPDATED: &str = r#"
[[routes]]
path = "all"
handler = "list-view"

[[routes]]
path = "**"
handler = "add-view"

[[handlers]]
name = "list-view"

[[handlers]]
name = "add-view"
"#;

// References a handler the running router never registered.
const UNRESOLVABLE: &str = r#"
[[routes]]
path = "all"
handler = "ghost-view"

[[handlers]]
name = "ghost-view"
"#;

fn scratch_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("nav-router-reload-{}-{}", std::process::id(), name));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_register_swap() {
    let path = scratch_file("a.toml", INITIAL);

    let config = load_config(&path).unwrap();
    let router = Router::register(config.build_table().unwrap(), config.build_registry()).unwrap();
    assert_eq!(router.resolve("unknown").unwrap().handler_id.as_str(), "list-view");

    fs::write(&path, UPDATED).unwrap();
    let updated = load_config(&path).unwrap();
    router.swap(updated.build_table().unwrap()).unwrap();

    assert_eq!(router.resolve("unknown").unwrap().handler_id.as_str(), "add-view");
    assert_eq!(router.resolve("all").unwrap().handler_id.as_str(), "list-view");

    fs::remove_file(path).unwrap();
}

#[test]
fn test_swap_rejects_handlers_unknown_to_the_registry() {
    let path = scratch_file("b.toml", INITIAL);

    let config = load_config(&path).unwrap();
    let router = Router::register(config.build_table().unwrap(), config.build_registry()).unwrap();

    // The update is self-consistent but its handler set was never
    // registered with this router.
    fs::write(&path, UNRESOLVABLE).unwrap();
    let update = load_config(&path).unwrap();
    assert!(router.swap(update.build_table().unwrap()).is_err());

    // The previous table still answers.
    assert_eq!(router.resolve("create").unwrap().handler_id.as_str(), "add-view");

    fs::remove_file(path).unwrap();
}

#[test]
fn test_invalid_update_fails_validation_on_load() {
    let path = scratch_file(
        "c.toml",
        r#"
        [[routes]]
        path = "**"
        handler = "list-view"

        [[routes]]
        path = "all"
        handler = "list-view"

        [[handlers]]
        name = "list-view"
        "#,
    );

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));

    fs::remove_file(path).unwrap();
}
