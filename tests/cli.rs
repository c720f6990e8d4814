use assert_cmd::Command;
use predicates::prelude::*;

fn attendance_pro() -> Command {
    Command::cargo_bin("attendance-pro").expect("binary builds")
}

#[test]
fn check_reports_a_yellow_standing() {
    attendance_pro()
        .args(["check", "--total", "100", "--attended", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current attendance: 80.0% (yellow)"))
        .stdout(predicate::str::contains("You can miss the next 6 classes."));
}

#[test]
fn check_reports_a_red_standing() {
    attendance_pro()
        .args(["check", "--total", "20", "--attended", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current attendance: 50.0% (red)"))
        .stdout(predicate::str::contains(
            "You need to attend the next 20 classes consecutively.",
        ));
}

#[test]
fn bare_check_is_the_neutral_state() {
    attendance_pro()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("(gray)"))
        .stdout(predicate::str::contains(
            "Total classes must be greater than zero.",
        ));
}

#[test]
fn attended_above_total_blocks_with_a_message() {
    attendance_pro()
        .args(["check", "--total", "10", "--attended", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Attended classes cannot be more than total classes.",
        ));
}

#[test]
fn check_projects_future_misses() {
    attendance_pro()
        .args(["check", "--total", "100", "--attended", "80", "--miss", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Projected after missing 5 more classes: 76.19% (yellow)",
        ));
}

#[test]
fn check_json_matches_the_summary_shape() {
    let output = attendance_pro()
        .args([
            "check",
            "--total",
            "100",
            "--attended",
            "80",
            "--miss",
            "5",
            "--json",
        ])
        .output()
        .expect("run binary");
    assert!(output.status.success());

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON summary");
    assert_eq!(summary["status"], "yellow");
    assert_eq!(summary["advice"]["kind"], "safe_to_miss");
    assert_eq!(summary["advice"]["classes"], 6);
    assert_eq!(summary["projection"]["future_misses"], 5);
}

#[test]
fn roster_ranks_classes_riskiest_first() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let csv = dir.path().join("classes.csv");
    std::fs::write(
        &csv,
        "name,total,attended,min_percent\n\
         Mathematics,40,36,\n\
         Chemistry,40,26,\n\
         Physics,40,31,\n",
    )
    .expect("write roster");

    let output = attendance_pro()
        .arg("roster")
        .arg("--csv")
        .arg(&csv)
        .output()
        .expect("run binary");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Classes by attendance risk:"));
    let chemistry = stdout.find("Chemistry").expect("chemistry line");
    let mathematics = stdout.find("Mathematics").expect("mathematics line");
    assert!(chemistry < mathematics);
}

#[test]
fn missing_roster_fails_with_context() {
    attendance_pro()
        .args(["roster", "--csv", "absent.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open roster"));
}

#[test]
fn report_writes_markdown_with_projection() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let out = dir.path().join("report.md");

    attendance_pro()
        .args(["report", "--total", "100", "--attended", "80", "--miss", "3"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let report = std::fs::read_to_string(&out).expect("report exists");
    assert!(report.contains("# Attendance Report"));
    assert!(report.contains("## Projection"));
}

#[test]
fn report_rejects_a_roster_and_a_scenario_together() {
    attendance_pro()
        .args(["report", "--csv", "classes.csv", "--total", "10"])
        .assert()
        .failure();
}

#[test]
fn sample_roster_feeds_straight_into_roster() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let csv = dir.path().join("classes.csv");

    attendance_pro()
        .arg("sample")
        .arg("--out")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample roster written to"));

    attendance_pro()
        .arg("roster")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Chemistry (red)"));
}
