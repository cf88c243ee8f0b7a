use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs `pi` against an empty home directory with no Pixela variables set,
/// so nothing leaks in from the developer's own config.
fn pi(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pi").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("PIXELA_API_BASE")
        .env_remove("PIXELA_USER_TOKEN")
        .env_remove("PIXELA_USER_NAME");
    cmd
}

fn home() -> TempDir {
    tempfile::tempdir().unwrap()
}

// ── Help & Version ──────────────────────────────────────────

#[test]
fn test_help() {
    let home = home();
    pi(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pixela"))
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("graphs"))
        .stdout(predicate::str::contains("pixel"))
        .stdout(predicate::str::contains("webhooks"))
        .stdout(predicate::str::contains("channels"))
        .stdout(predicate::str::contains("notifications"))
        .stdout(predicate::str::contains("PIXELA_USER_TOKEN"));
}

#[test]
fn test_version_flag() {
    let home = home();
    pi(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pi 0.1.0"));
}

#[test]
fn test_version_command() {
    let home = home();
    pi(&home)
        .arg("version")
        .assert()
        .success()
        .stdout("pi version: 0.1.0\n");
}

#[test]
fn test_graphs_help_lists_actions() {
    let home = home();
    pi(&home)
        .args(["graphs", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("svg"))
        .stdout(predicate::str::contains("detail"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("pixels"));
}

#[test]
fn test_ntf_alias() {
    let home = home();
    pi(&home)
        .args(["ntf", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create"));
}

#[test]
fn test_user_token_value_hidden_in_help() {
    let home = home();
    pi(&home)
        .env("PIXELA_USER_TOKEN", "supersecretvalue")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("supersecretvalue").not());
}

// ── URL-only commands ───────────────────────────────────────

#[test]
fn test_graphs_svg_prints_url() {
    let home = home();
    pi(&home)
        .args([
            "graphs", "svg", "--username", "alice", "--graph-id", "g1", "--date", "20190101",
            "--mode", "short",
        ])
        .assert()
        .success()
        .stdout("https://pixe.la/v1/users/alice/graphs/g1?date=20190101&mode=short\n");
}

#[test]
fn test_graphs_svg_uses_api_base_env() {
    let home = home();
    pi(&home)
        .env("PIXELA_API_BASE", "pixela.example.com")
        .args(["graphs", "svg", "--username", "alice", "--graph-id", "g1"])
        .assert()
        .success()
        .stdout("https://pixela.example.com/v1/users/alice/graphs/g1\n");
}

#[test]
fn test_graphs_svg_username_from_env() {
    let home = home();
    pi(&home)
        .env("PIXELA_USER_NAME", "bob")
        .args(["graphs", "svg", "--graph-id", "g1", "--mode", "badge"])
        .assert()
        .success()
        .stdout("https://pixe.la/v1/users/bob/graphs/g1?mode=badge\n");
}

#[test]
fn test_graphs_detail_prints_url() {
    let home = home();
    pi(&home)
        .args([
            "graphs", "detail", "--username", "alice", "--graph-id", "g1", "--mode",
            "simple-short",
        ])
        .assert()
        .success()
        .stdout("https://pixe.la/v1/users/alice/graphs/g1.html?mode=simple-short\n");
}

#[test]
fn test_graphs_list_prints_url() {
    let home = home();
    pi(&home)
        .args(["graphs", "list", "--username", "alice"])
        .assert()
        .success()
        .stdout("https://pixe.la/v1/users/alice/graphs.html\n");
}

// ── Failures before any request ─────────────────────────────

#[test]
fn test_missing_username_fails() {
    let home = home();
    pi(&home)
        .args(["graphs", "svg", "--graph-id", "g1"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("PIXELA_USER_NAME"));
}

#[test]
fn test_missing_token_fails() {
    let home = home();
    pi(&home)
        .args(["pixel", "increment", "--username", "alice", "--graph-id", "g1"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Token is not set"));
}

#[test]
fn test_too_many_purge_cache_urls_fails() {
    let home = home();
    let mut cmd = pi(&home);
    cmd.args([
        "--api-base",
        "127.0.0.1:1",
        "--user-token",
        "thisissecret",
        "graphs",
        "update",
        "--username",
        "alice",
        "--graph-id",
        "g1",
    ]);
    for i in 0..6 {
        cmd.args(["--purge-cache-urls", &format!("http://example.com/{i}")]);
    }
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("too many purge-cache URLs"));
}

#[test]
fn test_invalid_choice_fails() {
    let home = home();
    pi(&home)
        .args([
            "graphs", "svg", "--username", "alice", "--graph-id", "g1", "--mode", "tall",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_required_flag_fails() {
    let home = home();
    pi(&home)
        .args(["pixel", "post", "--username", "alice", "--graph-id", "g1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--date"));
}

#[test]
fn test_invalid_channel_detail_fails() {
    let home = home();
    pi(&home)
        .args([
            "--user-token",
            "thisissecret",
            "channels",
            "create",
            "--username",
            "alice",
            "--channel-id",
            "c1",
            "--name",
            "n",
            "--type",
            "slack",
            "--detail",
            "{not json",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--detail is not valid JSON"));
}

#[test]
fn test_no_command_shows_help() {
    let home = home();
    pi(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ── Config ──────────────────────────────────────────────────

#[test]
fn test_config_path() {
    let home = home();
    pi(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".pi/config.json"));
}

#[test]
fn test_config_set_then_show() {
    let home = home();
    pi(&home)
        .args(["config", "set", "username", "alice"])
        .assert()
        .success();
    pi(&home)
        .args(["config", "set", "user_token", "thisissecret"])
        .assert()
        .success();

    assert!(home.path().join(".pi").join("config.json").exists());

    pi(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\": \"alice\""))
        .stdout(predicate::str::contains("this...et"))
        .stdout(predicate::str::contains("thisissecret").not());
}

#[test]
fn test_config_username_used_by_commands() {
    let home = home();
    pi(&home)
        .args(["config", "set", "username", "carol"])
        .assert()
        .success();
    pi(&home)
        .args(["graphs", "list"])
        .assert()
        .success()
        .stdout("https://pixe.la/v1/users/carol/graphs.html\n");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let home = home();
    pi(&home)
        .args(["config", "set", "color", "kuro"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown config key"));
}
