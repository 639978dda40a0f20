//! ---
//! plt_section: "01-core-functionality"
//! plt_subsection: "integration-tests"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Configuration loading tests for file and environment layers."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use plt_common::config::{ENV_GATEWAY_PROTOCOL, ENV_GATEWAY_URL, ENV_MODE};
use plt_common::{ConfigurationError, HarnessConfig, LogFormat};

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

const SAMPLE: &str = r#"
[target]
mode = "localhost"
gateway_protocol = "https"

[fixtures]
root = "/opt/loadtest"

[requests]
timeout = 45

[logging]
directory = "/tmp/plt-logs"
format = "structured-json"
"#;

#[test]
fn parses_toml_sections() {
    let config: HarnessConfig = SAMPLE.parse().unwrap();
    assert_eq!(config.target.mode.as_deref(), Some("localhost"));
    assert_eq!(config.target.gateway_protocol.as_deref(), Some("https"));
    assert_eq!(config.fixtures.root, Some(PathBuf::from("/opt/loadtest")));
    assert_eq!(config.requests.timeout, Duration::from_secs(45));
    assert_eq!(config.logging.format, LogFormat::StructuredJson);
}

#[test]
fn environment_overrides_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loadtest.toml");
    fs::write(&path, SAMPLE).unwrap();

    let env = vars(&[(ENV_MODE, "api-gateway"), (ENV_GATEWAY_URL, "example.com:9090")]);
    let loaded =
        HarnessConfig::load_with_lookup(&[path.clone()], |key| env.get(key).cloned()).unwrap();

    assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
    assert_eq!(loaded.config.target.mode.as_deref(), Some("api-gateway"));
    assert_eq!(
        loaded.config.target.gateway_url.as_deref(),
        Some("example.com:9090")
    );
    assert_eq!(loaded.config.target.gateway_protocol.as_deref(), Some("https"));
}

#[test]
fn explicit_config_path_wins_over_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let candidate = dir.path().join("candidate.toml");
    let explicit = dir.path().join("explicit.toml");
    fs::write(&candidate, "[target]\nmode = \"localhost\"\n").unwrap();
    fs::write(&explicit, "[target]\nmode = \"api-gateway\"\n").unwrap();

    let env = vars(&[(
        HarnessConfig::ENV_CONFIG_PATH,
        explicit.to_str().unwrap(),
    )]);
    let loaded =
        HarnessConfig::load_with_lookup(&[candidate], |key| env.get(key).cloned()).unwrap();

    assert_eq!(loaded.source.as_deref(), Some(explicit.as_path()));
    assert_eq!(loaded.config.target.mode.as_deref(), Some("api-gateway"));
}

#[test]
fn named_file_ignores_config_path_variable() {
    let dir = tempfile::tempdir().unwrap();
    let named = dir.path().join("named.toml");
    let from_env = dir.path().join("from-env.toml");
    fs::write(&named, "[target]\nmode = \"api-gateway\"\n").unwrap();
    fs::write(&from_env, "[target]\nmode = \"localhost\"\n").unwrap();

    let env = vars(&[
        (HarnessConfig::ENV_CONFIG_PATH, from_env.to_str().unwrap()),
        (ENV_GATEWAY_PROTOCOL, "https"),
    ]);
    let loaded =
        HarnessConfig::load_file_with_lookup(&named, |key| env.get(key).cloned()).unwrap();

    assert_eq!(loaded.source.as_deref(), Some(named.as_path()));
    assert_eq!(loaded.config.target.mode.as_deref(), Some("api-gateway"));
    assert_eq!(loaded.config.target.gateway_protocol.as_deref(), Some("https"));
}

#[test]
fn missing_files_fall_back_to_environment() {
    let env = vars(&[(ENV_GATEWAY_PROTOCOL, "ftp")]);
    let loaded = HarnessConfig::load_with_lookup(&["/nonexistent/loadtest.toml"], |key| {
        env.get(key).cloned()
    })
    .unwrap();

    assert!(loaded.source.is_none());
    // Protocol interpretation belongs to the resolver, so the raw value survives loading.
    assert_eq!(loaded.config.target.gateway_protocol.as_deref(), Some("ftp"));
}

#[test]
fn blank_gateway_url_in_file_is_rejected() {
    let err = "[target]\ngateway_url = \"  \"\n"
        .parse::<HarnessConfig>()
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigurationError>(),
        Some(&ConfigurationError::EmptyGatewayUrl)
    );
}

#[test]
fn unreadable_explicit_path_reports_context() {
    let env = vars(&[(HarnessConfig::ENV_CONFIG_PATH, "/nonexistent/explicit.toml")]);
    let err = HarnessConfig::load_with_lookup::<PathBuf, _>(&[], |key| env.get(key).cloned())
        .unwrap_err();
    assert!(err.to_string().contains("unable to read config file"));
}
