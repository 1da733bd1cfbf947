use assert_cmd::Command;
use httpmock::Method::GET;
use httpmock::MockServer;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

fn folio() -> Command {
    Command::cargo_bin("folio").expect("folio binary")
}

fn parse_stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout should be JSON")
}

fn write_config(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write config");
}

#[test]
fn init_then_check_reports_a_healthy_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config_path = temp.path().join("folio.toml");

    let output = folio()
        .args(["init", "--json", "--config"])
        .arg(&config_path)
        .output()
        .expect("run init");
    assert!(output.status.success());
    let init_json = parse_stdout_json(&output.stdout);
    assert_eq!(init_json["ok"], true);
    assert!(config_path.is_file());

    let output = folio()
        .args(["check", "--json", "--config"])
        .arg(&config_path)
        .output()
        .expect("run check");
    assert!(output.status.success());
    let check_json = parse_stdout_json(&output.stdout);
    assert_eq!(check_json["ok"], true);
    assert_eq!(check_json["result"]["username"], "octocat");
}

#[test]
fn init_refuses_to_overwrite_an_existing_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config_path = temp.path().join("folio.toml");
    write_config(&config_path, "[github]\nusername = \"alice\"\n");

    folio()
        .args(["init", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .code(2);
}

#[test]
fn check_flags_a_config_without_a_username() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config_path = temp.path().join("folio.toml");
    write_config(&config_path, "skills = [\"Rust\"]\n");

    let output = folio()
        .args(["check", "--json", "--config"])
        .arg(&config_path)
        .output()
        .expect("run check");
    assert_eq!(output.status.code(), Some(3));

    let check_json = parse_stdout_json(&output.stdout);
    assert_eq!(check_json["ok"], false);
    assert_eq!(check_json["result"]["username"], Value::Null);
}

#[test]
fn show_renders_the_full_portfolio_as_json() {
    let server = MockServer::start();
    let temp = tempfile::tempdir().expect("tempdir");
    let config_path = temp.path().join("folio.toml");
    write_config(
        &config_path,
        r#"
        skills = ["Rust", "SQL"]

        [github]
        username = "alice"

        [projects.github]
        mode = "manual"

        [projects.github.manual]
        projects = ["alice/foo"]

        [social]
        linkedin = "alice"
        "#,
    );

    let user = server.mock(|when, then| {
        when.method(GET).path("/users/alice");
        then.status(200).json_body(json!({
            "login": "alice",
            "name": "Alice",
            "bio": "systems tinkerer",
            "public_repos": 4
        }));
    });
    let search = server.mock(|when, then| {
        when.method(GET).path("/search/repositories");
        then.status(200).json_body(json!({
            "items": [
                {"full_name": "alice/foo", "stargazers_count": 12, "language": "Rust"}
            ]
        }));
    });

    let output = folio()
        .args(["show", "--json", "--config"])
        .arg(&config_path)
        .arg("--api-url")
        .arg(server.base_url())
        .output()
        .expect("run show");
    assert!(output.status.success());

    user.assert_hits(1);
    search.assert_hits(1);

    let show_json = parse_stdout_json(&output.stdout);
    assert_eq!(show_json["ok"], true);
    assert_eq!(show_json["result"]["profile"]["name"], "Alice");
    assert_eq!(show_json["result"]["projects"][0]["full_name"], "alice/foo");
    assert_eq!(show_json["result"]["config"]["skills"][0], "Rust");
}

#[test]
fn show_renders_human_sections() {
    let server = MockServer::start();
    let temp = tempfile::tempdir().expect("tempdir");
    let config_path = temp.path().join("folio.toml");
    write_config(
        &config_path,
        r#"
        skills = ["Rust"]

        [github]
        username = "alice"

        [projects.github]
        display = false

        [[testimonials]]
        quote = "ships fast"
        name = "Bob"
        title = "CTO"
        "#,
    );

    server.mock(|when, then| {
        when.method(GET).path("/users/alice");
        then.status(200).json_body(json!({
            "login": "alice",
            "name": "Alice",
            "location": "Lisbon",
            "public_repos": 4
        }));
    });

    let output = folio()
        .args(["show", "--config"])
        .arg(&config_path)
        .arg("--api-url")
        .arg(server.base_url())
        .output()
        .expect("run show");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Alice (@alice)"));
    assert!(stdout.contains("Lisbon"));
    assert!(stdout.contains("## Skills"));
    assert!(stdout.contains("Rust"));
    assert!(stdout.contains("## Testimonials"));
    assert!(!stdout.contains("Github Projects"));
}

#[test]
fn show_maps_an_unknown_user_to_exit_code_4() {
    let server = MockServer::start();
    let temp = tempfile::tempdir().expect("tempdir");
    let config_path = temp.path().join("folio.toml");
    write_config(&config_path, "[github]\nusername = \"nobody\"\n");

    server.mock(|when, then| {
        when.method(GET).path("/users/nobody");
        then.status(404).json_body(json!({"message": "Not Found"}));
    });

    let output = folio()
        .args(["show", "--json", "--config"])
        .arg(&config_path)
        .arg("--api-url")
        .arg(server.base_url())
        .output()
        .expect("run show");
    assert_eq!(output.status.code(), Some(4));

    let error_json: Value = serde_json::from_slice(&output.stderr).expect("stderr JSON");
    assert_eq!(error_json["ok"], false);
    assert_eq!(error_json["error"]["kind"], "not_found");
}

#[test]
fn show_without_a_config_file_is_an_io_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config_path = temp.path().join("missing.toml");

    folio()
        .args(["show", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .code(7);
}

#[test]
fn show_flags_an_empty_config_before_any_network_access() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config_path = temp.path().join("folio.toml");
    write_config(&config_path, "");

    // No mock server at all: an invalid config must fail without a fetch.
    let output = folio()
        .args(["show", "--json", "--config"])
        .arg(&config_path)
        .args(["--api-url", "http://127.0.0.1:9"])
        .output()
        .expect("run show");
    assert_eq!(output.status.code(), Some(3));

    let error_json: Value = serde_json::from_slice(&output.stderr).expect("stderr JSON");
    assert_eq!(error_json["error"]["kind"], "config");
}
