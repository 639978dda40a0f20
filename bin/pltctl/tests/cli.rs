//! ---
//! plt_section: "05-cli"
//! plt_subsection: "integration-tests"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Black-box tests for the pltctl binary."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
use std::fs;
use std::path::Path;
use std::process::Output;

use assert_cmd::Command;

const TARGET_VARS: [&str; 5] = [
    "MODE",
    "API_GATEWAY_URL",
    "API_GATEWAY_PROTOCOL",
    "TEST_FOLDER_ABS_PATH",
    "PLT_CONFIG",
];

fn pltctl(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pltctl").unwrap();
    cmd.current_dir(workdir);
    for var in TARGET_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn prints_direct_endpoints_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = pltctl(dir.path()).arg("endpoints").output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["pipelinePublicHost"], "http://pipeline-backend:8081");
    assert_eq!(json["connectorGRPCPublicHost"], "connector-backend:8082");
    assert_eq!(json["modelPublicHost"], "http://model-backend:8083");
}

#[test]
fn gateway_variant_honours_url_override() {
    let dir = tempfile::tempdir().unwrap();
    let output = pltctl(dir.path())
        .args(["endpoints", "--variant", "gateway", "--format", "env"])
        .env("API_GATEWAY_URL", "example.com:9090")
        .env("API_GATEWAY_PROTOCOL", "https")
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("pipelinePublicHost=https://example.com:9090\n"));
    assert!(text.contains("mgmtGRPCPublicHost=example.com:9090\n"));
    assert!(text.contains("pipelinePrivateHost=http://pipeline-backend:3081\n"));
}

#[test]
fn invalid_protocol_exits_with_error_and_no_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let output = pltctl(dir.path())
        .arg("endpoints")
        .env("MODE", "api-gateway")
        .env("API_GATEWAY_PROTOCOL", "ftp")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("API_GATEWAY_PROTOCOL"));
}

#[test]
fn config_file_supplies_mode() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("loadtest.toml"),
        "[target]\nmode = \"localhost\"\n",
    )
    .unwrap();
    let output = pltctl(dir.path()).arg("endpoints").output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["connectorPublicHost"], "http://localhost:8080");
}

#[test]
fn config_flag_wins_over_config_variable() {
    let dir = tempfile::tempdir().unwrap();
    let flagged = dir.path().join("flagged.toml");
    let from_env = dir.path().join("from-env.toml");
    fs::write(&flagged, "[target]\nmode = \"api-gateway\"\n").unwrap();
    fs::write(&from_env, "[target]\nmode = \"localhost\"\n").unwrap();

    let output = pltctl(dir.path())
        .arg("--config")
        .arg(&flagged)
        .arg("endpoints")
        .env("PLT_CONFIG", &from_env)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["connectorPublicHost"], "http://api-gateway:8080");
}

#[test]
fn lists_and_renders_recipes() {
    let dir = tempfile::tempdir().unwrap();
    let listed = pltctl(dir.path()).args(["recipe", "--list"]).output().unwrap();
    assert!(stdout(&listed).lines().any(|line| line == "simple-recipe"));

    let rendered = pltctl(dir.path())
        .args(["recipe", "det-async-multi-model"])
        .output()
        .unwrap();
    assert!(rendered.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&rendered)).unwrap();
    assert_eq!(
        json["recipe"]["destination"],
        "destination-connectors/some-cool-name-for-dst-csv-connector"
    );

    let unknown = pltctl(dir.path())
        .args(["recipe", "nope"])
        .output()
        .unwrap();
    assert!(!unknown.status.success());
}

#[test]
fn fixtures_require_a_root() {
    let dir = tempfile::tempdir().unwrap();
    let output = pltctl(dir.path()).arg("fixtures").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("TEST_FOLDER_ABS_PATH"));
}

#[test]
fn fixtures_print_base64() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("integration-test/data");
    fs::create_dir_all(&data).unwrap();
    for name in ["dog.jpg", "cat.jpg", "bear.jpg", "dog-rgba.png", "dummy-det-model.zip"] {
        fs::write(data.join(name), b"img").unwrap();
    }

    let output = pltctl(dir.path())
        .args(["fixtures", "--base64"])
        .env("TEST_FOLDER_ABS_PATH", dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("dog.jpg\taW1n\n"));
    assert!(text.contains("dummy-det-model.zip\t3 bytes\n"));
}

#[test]
fn params_embed_the_requested_user() {
    let dir = tempfile::tempdir().unwrap();
    let uid = "6f1c2b1e-8a51-4c2f-9a57-0d5e4f1b7c3a";
    let output = pltctl(dir.path())
        .args(["params", "--user-uid", uid])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["http_with_jwt"]["headers"]["Instill-User-Uid"], uid);
    assert_eq!(json["grpc_with_jwt"]["metadata"]["Instill-User-Uid"], uid);
    assert_eq!(json["http_with_jwt_sub"]["headers"]["Jwt-Sub"], uid);
    assert_eq!(json["http"]["timeout"], "300s");
}
