//! Commands that never reach the backend.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use roomflow_testing::TestWorld;

#[test]
fn test_quote_three_nights() {
    let world = TestWorld::new();
    let result = world
        .run(&[
            "quote",
            "--rate",
            "100",
            "--check-in",
            "2024-01-01",
            "--check-out",
            "2024-01-04",
        ])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Nights         3"));
    assert!(result.stdout().contains("Taxes (10%)    $30"));
    assert!(result.stdout().contains("Total          $330"));
}

#[test]
fn test_quote_json() {
    let world = TestWorld::new();
    let mut cmd = cargo_bin_cmd!("roomflow");
    cmd.arg("--data-dir").arg(world.data_dir()).args([
        "--format",
        "json",
        "quote",
        "--rate",
        "100",
        "--check-in",
        "2024-01-01",
        "--check-out",
        "2024-01-04",
    ]);
    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["nights"], 3);
    assert_eq!(json["total"], "330");
}

#[test]
fn test_quote_without_dates_prices_one_night() {
    let world = TestWorld::new();
    let result = world.run(&["quote", "--rate", "80"]).unwrap();
    assert!(result.success());
    assert!(result.stdout().contains("Nights         1"));
    assert!(result.stdout().contains("Total          $88"));
}

#[test]
fn test_calendar_marks_selection() {
    let world = TestWorld::new();
    let result = world
        .run(&[
            "calendar",
            "--today",
            "2024-01-03",
            "--check-in",
            "2024-01-04",
            "--check-out",
            "2024-01-07",
        ])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let stdout = result.stdout();
    assert!(stdout.starts_with("Jan 2024\n"));
    assert!(stdout.contains("    ( 1)( 2)  3 [ 4   5   6\n"));
    assert!(stdout.contains("  7]  8   9  10  11  12  13\n"));
    assert!(stdout.contains("Jan 4, 2024 - Jan 7, 2024 (3 nights)"));
}

#[test]
fn test_calendar_month_override() {
    let world = TestWorld::new();
    let result = world
        .run(&["calendar", "--today", "2024-01-03", "--month", "2024-02"])
        .unwrap();
    assert!(result.success());
    assert!(result.stdout().starts_with("Feb 2024\n"));
    assert!(result.stdout().contains("Please select dates"));
}

#[test]
fn test_calendar_rejects_inverted_range() {
    let world = TestWorld::new();
    let mut cmd = cargo_bin_cmd!("roomflow");
    world.configure_command(&mut cmd).args([
        "calendar",
        "--check-in",
        "2024-01-07",
        "--check-out",
        "2024-01-04",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid date range"));
}

#[test]
fn test_check_out_requires_check_in() {
    let world = TestWorld::new();
    let result = world
        .run(&["calendar", "--check-out", "2024-01-04"])
        .unwrap();
    assert!(!result.success());
}

#[test]
fn test_config_set_url_persists() {
    let world = TestWorld::new().with_env("ROOMFLOW_API_URL", "");

    let result = world
        .run(&["config", "set-url", "https://api.example.com/v1"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(
        result
            .stdout()
            .contains("API base URL set to https://api.example.com/v1/")
    );

    let content = std::fs::read_to_string(world.data_dir().join("config.toml")).unwrap();
    assert!(content.contains("base_url = \"https://api.example.com/v1/\""));

    let result = world.run(&["config", "show"]).unwrap();
    assert!(result.stdout().contains("API base URL: https://api.example.com/v1/"));
    assert!(result.stdout().contains("Badge poll:   5s"));
}

#[test]
fn test_config_rejects_non_http_url() {
    let world = TestWorld::new();
    let mut cmd = cargo_bin_cmd!("roomflow");
    world
        .configure_command(&mut cmd)
        .args(["config", "set-url", "ftp://example.com"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("http or https"));
    assert!(!world.data_dir().join("config.toml").exists());
}

#[test]
fn test_book_dry_run_with_known_rate() {
    let world = TestWorld::new();
    let result = world
        .run(&[
            "book",
            "--room",
            "3",
            "--rate",
            "100",
            "--today",
            "2024-01-01",
            "--check-in",
            "2024-01-04",
            "--check-out",
            "2024-01-07",
            "--children",
            "1",
            "--dry-run",
        ])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let stdout = result.stdout();
    assert!(stdout.starts_with("Room 3\n"));
    assert!(stdout.contains("Jan 4, 2024 - Jan 7, 2024 (3 nights)"));
    assert!(stdout.contains("2 adults | 1 child"));
    assert!(stdout.contains("Total          $330"));
    assert!(!stdout.contains("Booked"));
}

#[test]
fn test_book_refuses_past_check_in() {
    let world = TestWorld::new();
    let mut cmd = cargo_bin_cmd!("roomflow");
    world.configure_command(&mut cmd).args([
        "book",
        "--room",
        "3",
        "--rate",
        "100",
        "--today",
        "2024-01-10",
        "--check-in",
        "2024-01-04",
        "--check-out",
        "2024-01-07",
        "--dry-run",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Check-in Jan 4, 2024 is in the past"));
}

#[test]
fn test_book_needs_an_adult() {
    let world = TestWorld::new();
    let result = world
        .run(&[
            "book",
            "--room",
            "3",
            "--rate",
            "100",
            "--today",
            "2024-01-01",
            "--check-in",
            "2024-01-04",
            "--check-out",
            "2024-01-07",
            "--adults",
            "0",
            "--dry-run",
        ])
        .unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("at least one adult"));
}

#[test]
fn test_signed_out_profile_and_badge() {
    let world = TestWorld::new();

    let result = world.run(&["profile", "show"]).unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("Not signed in"));

    let result = world.run(&["logout"]).unwrap();
    assert!(result.success());
    assert_eq!(result.stdout(), "Not signed in.\n");

    let result = world.run(&["badge", "watch", "--updates", "1"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert_eq!(result.stdout(), "Unread: 0\n");

    let result = world.run(&["notifications", "count"]).unwrap();
    assert!(result.success());
    assert_eq!(result.stdout(), "No unread notifications.\n");
}

#[test]
fn test_signed_in_profile_and_logout() {
    let world = TestWorld::new().signed_in();

    let result = world.run(&["profile", "show"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Name:          Ana Nguyen"));
    assert!(result.stdout().contains("Phone:         (091) 234-5678"));

    let result = world.run(&["logout"]).unwrap();
    assert_eq!(result.stdout(), "Signed out.\n");
    assert!(world.stored_session().get("accessToken").is_none());
}
