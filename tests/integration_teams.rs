use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const TEAMS: &str = r#"
[[teams]]
id = "dev"
name = "Development"
start_date = "2025-02-07"

[[teams.members]]
id = "a"
name = "Anna Bell"
position = "Developer"

[[teams.members]]
id = "b"
name = "Ben Carter"

[[teams.members]]
id = "c"
name = "Cleo Diaz"

[[teams.members]]
id = "d"
name = "Dan Evans"

[[teams]]
id = "ops"
name = "Operations"
start_date = "2025-01-03"

[[teams.members]]
id = "x"
name = "Xavier Young"

[[teams.members]]
id = "y"
name = "Yara Zane"
"#;

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".friday-rota.toml"), TEAMS).unwrap();
    dir
}

fn rota(dir: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("friday-rota");
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--root")
        .arg(dir.path())
        .arg("--state")
        .arg(dir.path().join("state.json"));
    cmd
}

fn json(dir: &TempDir, args: &[&str]) -> Value {
    let output = rota(dir)
        .args(args)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

fn state(dir: &TempDir) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.path().join("state.json")).unwrap()).unwrap()
}

#[test]
fn test_teams_lists_registry_with_first_selected() {
    let dir = setup();
    let teams = json(&dir, &["teams"]);
    let teams = teams["teams"].as_array().unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0]["id"], "dev");
    assert_eq!(teams[0]["members"], 4);
    assert_eq!(teams[0]["start_date"], "2025-02-07");
    assert_eq!(teams[0]["selected"], true);
    assert_eq!(teams[1]["selected"], false);
}

#[test]
fn test_teams_text_output() {
    let dir = setup();
    rota(&dir)
        .arg("teams")
        .assert()
        .success()
        .stdout(predicate::str::contains("Development"))
        .stdout(predicate::str::contains("2 members, since 2025-01-03"));
}

#[test]
fn test_select_persists_across_runs() {
    let dir = setup();
    rota(&dir)
        .args(["select", "ops"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected team Operations (ops)"));

    assert_eq!(state(&dir)["selected_team"], "ops");

    let current = json(&dir, &["current", "--today", "2025-02-10"]);
    assert_eq!(current["team"]["id"], "ops");
    assert_eq!(current["turn"]["member"]["id"], "x");

    let teams = json(&dir, &["teams"]);
    assert_eq!(teams["teams"][1]["selected"], true);
}

#[test]
fn test_explicit_team_beats_selection() {
    let dir = setup();
    rota(&dir).args(["select", "ops"]).assert().success();
    let current = json(&dir, &["current", "--team", "dev", "--today", "2025-02-10"]);
    assert_eq!(current["team"]["id"], "dev");
}

#[test]
fn test_select_unknown_team_fails() {
    let dir = setup();
    rota(&dir)
        .args(["select", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("team not found: 'nope'"));
    assert!(!dir.path().join("state.json").exists());
}

#[test]
fn test_stale_selection_falls_back_with_warning() {
    let dir = setup();
    fs::write(
        dir.path().join("state.json"),
        r#"{"selected_team":"gone"}"#,
    )
    .unwrap();
    rota(&dir)
        .args(["current", "--today", "2025-02-07", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"dev\""))
        .stderr(predicate::str::contains("ignoring selection of unknown team"));
}

#[test]
fn test_default_team_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".friday-rota.toml"),
        format!("default_team = \"ops\"\n{TEAMS}"),
    )
    .unwrap();
    let current = json(&dir, &["current", "--today", "2025-02-10"]);
    assert_eq!(current["team"]["id"], "ops");
}

#[test]
fn test_restart_moves_rotation_start() {
    let dir = setup();
    let before = json(&dir, &["current", "--today", "2025-03-14"]);
    assert_eq!(before["turn"]["member"]["id"], "b");

    let restart = json(&dir, &["restart", "2025-03-14", "--today", "2025-03-14"]);
    assert_eq!(restart["start_date"], "2025-03-14");
    assert_eq!(restart["current"]["member"]["id"], "a");

    assert_eq!(state(&dir)["teams"]["dev"]["start_date"], "2025-03-14");

    let after = json(&dir, &["current", "--today", "2025-03-21"]);
    assert_eq!(after["turn"]["member"]["id"], "b");

    let teams = json(&dir, &["teams"]);
    assert_eq!(teams["teams"][0]["start_date"], "2025-03-14");

    // history no longer reaches before the new start
    let history = json(&dir, &["history", "--today", "2025-03-21"]);
    assert_eq!(history["turns"].as_array().unwrap().len(), 1);
}

#[test]
fn test_restart_rejects_bad_date() {
    let dir = setup();
    rota(&dir)
        .args(["restart", "2025-13-01"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("2025-13-01"));
}

#[test]
fn test_roster_marks_current_member() {
    let dir = setup();
    let roster = json(&dir, &["roster", "--today", "2025-02-21"]);
    assert_eq!(roster["current_index"], 2);
    let ids: Vec<&str> = roster["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
    assert_eq!(roster["members"][0]["initials"], "AB");

    rota(&dir)
        .args(["roster", "--today", "2025-02-21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("▶ 3. Cleo Diaz [CD]"))
        .stdout(predicate::str::contains("4 members"));
}
