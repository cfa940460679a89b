//! E2E tests for the calculate, schedule and schema commands

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test a full day in Gothenburg, with merged windows
#[test]
fn calculate_single_day() {
    let output = run(&[
        "calculate",
        "tests/data/gothenburg_day.csv",
        "--city",
        "Gothenburg",
        "--vehicle-type",
        "car",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    // Verify the command succeeded
    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("CONGESTION TAX (Gothenburg, car)"));
    assert!(stdout.contains("2013-02-08"));

    let output = run(&[
        "calculate",
        "tests/data/gothenburg_day.csv",
        "--city",
        "Gothenburg",
        "--vehicle-type",
        "car",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let days: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("valid JSON");
    assert_eq!(days.as_array().expect("array of days").len(), 1);
    assert_eq!(days[0]["date"], "2013-02-08");
    assert_eq!(days[0]["total"], 44);
    assert_eq!(days[0]["uncapped_total"], 44);
}

/// Test that each day in the input is taxed on its own
#[test]
fn calculate_multiple_days_json() {
    let output = run(&[
        "calculate",
        "tests/data/multi_day.csv",
        "--city",
        "Gothenburg",
        "--json",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let days: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let totals: Vec<(String, u64)> = days
        .as_array()
        .expect("array of days")
        .iter()
        .map(|day| {
            (
                day["date"].as_str().unwrap().to_string(),
                day["total"].as_u64().unwrap(),
            )
        })
        .collect();

    assert_eq!(
        totals,
        vec![
            ("2013-01-14".to_string(), 0),
            ("2013-02-07".to_string(), 31),
            ("2013-02-08".to_string(), 39),
            ("2013-03-26".to_string(), 13),
            // Registered holiday, still charged
            ("2013-03-28".to_string(), 13),
        ]
    );
    // Breakdown is only included on request
    assert_eq!(days[2]["charges"].as_array().unwrap().len(), 0);
}

/// Test the per-passage breakdown in JSON output
#[test]
fn calculate_breakdown_json() {
    let output = run(&[
        "calculate",
        "tests/data/gothenburg_day.csv",
        "--city",
        "Gothenburg",
        "--breakdown",
        "--json",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let days: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let running: Vec<u64> = days[0]["charges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["running_total"].as_u64().unwrap())
        .collect();
    assert_eq!(running, vec![13, 18, 18, 18, 36, 36, 44]);
}

/// Test that exempt vehicles pay nothing
#[test]
fn calculate_toll_free_vehicle() {
    let output = run(&[
        "calculate",
        "tests/data/gothenburg_day.csv",
        "--city",
        "Gothenburg",
        "--vehicle-type",
        "emergency",
        "--json",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"total\": 0"));
    assert!(stdout.contains("\"exempt\": \"TollFreeVehicle\""));
}

/// Test that unknown cities are not charged
#[test]
fn calculate_unknown_city() {
    let output = run(&[
        "calculate",
        "tests/data/gothenburg_day.csv",
        "--city",
        "gothenburg",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("unknown city"));
}

/// Test a custom configuration file with its own city and cap
#[test]
fn calculate_with_config() {
    let output = run(&[
        "calculate",
        "tests/data/gothenburg_day.csv",
        "--city",
        "Uppsala",
        "--config",
        "tests/data/uppsala.json",
        "--json",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"uncapped_total\": 30"));
    assert!(stdout.contains("\"total\": 20"));

    let bus = run(&[
        "calculate",
        "tests/data/gothenburg_day.csv",
        "--city",
        "Uppsala",
        "--config",
        "tests/data/uppsala.json",
        "--vehicle-type",
        "Bus",
        "--json",
    ]);
    assert!(bus.status.success(), "Command failed: {:?}", bus);
    assert!(String::from_utf8_lossy(&bus.stdout).contains("\"total\": 0"));
}

/// Test the fee table output
#[test]
fn schedule_single_city() {
    let output = run(&["schedule", "--city", "Stockholm"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("FEE SCHEDULES"));
    assert!(stdout.contains("Stockholm"));
    assert!(stdout.contains("15:30:00"));
    assert!(!stdout.contains("Gothenburg"));
}

/// Test the JSON fee table with a custom configuration
#[test]
fn schedule_json_lists_exempt_vehicle_types() {
    let output = run(&["schedule", "--config", "tests/data/uppsala.json", "--json"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let schedule: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(schedule["daily_maximum"], 20);
    assert_eq!(
        schedule["exempt_vehicle_types"],
        serde_json::json!(["bus", "emergency"])
    );
    assert!(schedule["cities"]["Uppsala"].is_array());
}

/// Test that an unknown city is an error for the schedule command
#[test]
fn schedule_unknown_city_fails() {
    let output = run(&["schedule", "--city", "Malmo"]);
    assert!(!output.status.success());
}

/// Test the configuration JSON schema
#[test]
fn schema_json() {
    let output = run(&["schema"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"daily_maximum\""));
    assert!(stdout.contains("\"window_minutes\""));
    assert!(stdout.contains("\"exemptions\""));
}
