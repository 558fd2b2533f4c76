//! Integration tests for config module public API.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use toolstrap::config::{load_config, validate, FailurePolicy, ToolstrapConfig};
use toolstrap::paths::PathResolver;
use toolstrap::platform::PlatformFamily;
use toolstrap::tools::resolve_tool_order;
use toolstrap::BootstrapError;

#[test]
fn defaults_without_config_file() {
    let temp = TempDir::new().unwrap();
    let config = load_config(temp.path(), None).unwrap();

    assert!(config.settings.assume_installed_without_check);
    assert_eq!(config.settings.failure_policy, FailurePolicy::Abort);
    validate(&config).unwrap();
}

#[test]
fn config_overrides_flow_into_tool_order() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.yml"),
        r#"
settings:
  failure_policy: continue
tools:
  node:
    paths: [node/bin/node, /usr/local/bin/npm]
  python:
    check:
      run: py --version
      pattern: "/^Python 3/m"
"#,
    )
    .unwrap();

    let config = load_config(temp.path(), None).unwrap();
    validate(&config).unwrap();
    assert_eq!(config.settings.failure_policy, FailurePolicy::Continue);

    let tools = resolve_tool_order(
        PlatformFamily::Unix,
        &PathResolver::new("/srv/ts"),
        &config.tools,
    )
    .unwrap();

    let node = tools.iter().find(|t| t.name == "node").unwrap();
    assert_eq!(
        node.expected_paths,
        vec![
            PathBuf::from("/srv/ts/bin/node/bin/node"),
            PathBuf::from("/usr/local/bin/npm")
        ]
    );
    let python = tools.iter().find(|t| t.name == "python").unwrap();
    assert_eq!(python.check.kind(), "pattern");
}

#[test]
fn unknown_tool_fails_validation() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.yml"),
        "tools:\n  rust:\n    install: curl https://sh.rustup.rs | sh\n",
    )
    .unwrap();

    let config = load_config(temp.path(), None).unwrap();
    let err = validate(&config).unwrap_err();
    assert!(matches!(err, BootstrapError::ConfigValidationError { .. }));
    assert!(err.to_string().contains("rust"));
}

#[test]
fn explicit_config_path_must_exist() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("custom.yml");

    let err = load_config(temp.path(), Some(&missing)).unwrap_err();
    assert!(matches!(err, BootstrapError::ConfigNotFound { .. }));
}

#[test]
fn config_round_trips_through_yaml() {
    let mut config = ToolstrapConfig {
        home: Some("~/toolstrap".into()),
        ..Default::default()
    };
    config.settings.failure_policy = FailurePolicy::Continue;

    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: ToolstrapConfig = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(parsed.home, config.home);
    assert_eq!(parsed.settings, config.settings);
    assert_eq!(parsed.tools, BTreeMap::new());
}
