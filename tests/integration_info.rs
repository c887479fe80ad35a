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
allergens = ["Nuts", "Gluten"]
birthdate = "02-14"
name_day = "07-26"

[[teams.members]]
id = "b"
name = "Ben Carter"
birthdate = "03-01"

[[teams.members]]
id = "c"
name = "Cleo Diaz"
allergens = ["Gluten"]
name_day = "02-11"

[[teams.members]]
id = "d"
name = "Dan Evans"
birthdate = "02-29"

[[teams]]
id = "calm"
start_date = "2025-02-07"

[[teams.members]]
id = "z"
name = "Zoe"
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

fn member_ids(entries: &Value) -> Vec<String> {
    entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["member"]["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_allergens_are_unique_and_sorted() {
    let dir = setup();
    let result = json(&dir, &["allergens"]);
    assert_eq!(result["allergens"], serde_json::json!(["Gluten", "Nuts"]));
    let ids: Vec<&str> = result["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[test]
fn test_allergens_text_output() {
    let dir = setup();
    rota(&dir)
        .arg("allergens")
        .assert()
        .success()
        .stdout(predicate::str::contains("Avoid: Gluten, Nuts"))
        .stdout(predicate::str::contains("Anna Bell [AB]: Gluten, Nuts"));

    rota(&dir)
        .args(["allergens", "--team", "calm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no allergens"));
}

#[test]
fn test_birthdays_sorted_by_days_remaining() {
    let dir = setup();
    let result = json(&dir, &["birthdays", "--today", "2025-02-10"]);
    let entries = &result["entries"];
    assert_eq!(member_ids(entries), vec!["a", "b", "d"]);
    assert_eq!(entries[0]["days_remaining"], 4);
    assert_eq!(entries[0]["date"], "2025-02-14");
    // Feb 29 falls on Mar 1 outside leap years
    assert_eq!(entries[2]["date"], "2025-03-01");
    assert_eq!(entries[2]["month_day"], "02-29");
}

#[test]
fn test_birthdays_count_and_leap_year() {
    let dir = setup();
    let result = json(&dir, &["birthdays", "--today", "2028-02-20", "--count", "1"]);
    let entries = &result["entries"];
    assert_eq!(member_ids(entries), vec!["d"]);
    assert_eq!(entries[0]["date"], "2028-02-29");
}

#[test]
fn test_birthday_today_is_zero_days() {
    let dir = setup();
    rota(&dir)
        .args(["birthdays", "--today", "2025-02-14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("14 February"))
        .stdout(predicate::str::contains("Anna Bell [AB]  today"));
}

#[test]
fn test_namedays() {
    let dir = setup();
    let result = json(&dir, &["namedays", "--today", "2025-02-10"]);
    let entries = &result["entries"];
    assert_eq!(member_ids(entries), vec!["c", "a"]);
    assert_eq!(entries[0]["days_remaining"], 1);
    assert_eq!(result["kind"], "name_day");

    rota(&dir)
        .args(["namedays", "--today", "2025-02-10", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| 11 February | Cleo Diaz | tomorrow |"))
        .stdout(predicate::str::contains("**2 name days**"));
}

#[test]
fn test_builtin_teams_when_no_config_found() {
    let dir = TempDir::new().unwrap();
    let teams = json(&dir, &["teams"]);
    let ids: Vec<&str> = teams["teams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"dev"));
    assert!(ids.contains(&"exemple"));

    let current = json(&dir, &["current", "--today", "2025-03-07"]);
    assert_eq!(current["team"]["id"], "dev");
    assert_eq!(current["turn"]["member"]["name"], "Sophie Martin");
    assert_eq!(current["turn"]["is_today"], true);
}

#[test]
fn test_invalid_cycle_day_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".friday-rota.toml"),
        "cycle_day = \"noday\"\n",
    )
    .unwrap();
    rota(&dir)
        .arg("teams")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
}
