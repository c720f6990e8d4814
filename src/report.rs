use std::fmt::Write;

use crate::attendance;
use crate::models::{AttendanceSummary, ClassStanding, Status, StatusSummary};

pub fn summarize_by_status(standings: &[ClassStanding]) -> Vec<StatusSummary> {
    let mut map: std::collections::HashMap<Status, (usize, f64)> =
        std::collections::HashMap::new();

    for standing in standings {
        let entry = map.entry(standing.summary.status).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += standing.summary.current_percent;
    }

    let mut summaries: Vec<StatusSummary> = map
        .into_iter()
        .map(|(status, (count, total_percent))| StatusSummary {
            status,
            count,
            avg_percent: if count == 0 {
                0.0
            } else {
                total_percent / count as f64
            },
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}

pub fn build_roster_report(label: &str, standings: &[ClassStanding]) -> String {
    let summaries = summarize_by_status(standings);

    let mut output = String::new();
    let _ = writeln!(output, "# Attendance Report");
    let _ = writeln!(
        output,
        "Generated {} for roster {}",
        chrono::Utc::now().date_naive(),
        label
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No classes in this roster.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} class{} (avg {:.1}%)",
                summary.status,
                summary.count,
                attendance::class_suffix(summary.count as u32),
                summary.avg_percent
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Most At-Risk Classes");

    if standings.is_empty() {
        let _ = writeln!(output, "No classes in this roster.");
    } else {
        for standing in standings.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} ({}) {:.1}% attended {}/{}",
                standing.name,
                standing.summary.status,
                standing.summary.current_percent,
                standing.summary.input.attended,
                standing.summary.input.total
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Advice");

    if standings.is_empty() {
        let _ = writeln!(output, "No classes in this roster.");
    } else {
        for standing in standings.iter().take(5) {
            let _ = writeln!(
                output,
                "- {}: {}",
                standing.name,
                attendance::advice_message(&standing.summary.advice)
            );
        }
    }

    output
}

pub fn build_check_report(summary: &AttendanceSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Attendance Report");
    let _ = writeln!(output, "Generated {}", chrono::Utc::now().date_naive());
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(
        output,
        "- Attended {} of {} classes (minimum {}%)",
        summary.input.attended, summary.input.total, summary.input.min_percent
    );
    let _ = writeln!(
        output,
        "- Current attendance: {:.1}% ({})",
        summary.current_percent, summary.status
    );
    let _ = writeln!(
        output,
        "- After one more miss: {:.1}% ({})",
        summary.after_one_miss_percent, summary.after_one_miss_status
    );
    let _ = writeln!(output, "- {}", attendance::advice_message(&summary.advice));

    if let Some(projection) = &summary.projection {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Projection");
        let _ = writeln!(
            output,
            "- After missing {} more class{}: {:.2}% ({})",
            projection.future_misses,
            attendance::class_suffix(projection.future_misses),
            projection.percent,
            projection.status
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::{build_input, evaluate, evaluate_roster};
    use crate::models::ClassRecord;

    fn standings() -> Vec<ClassStanding> {
        let records = vec![
            ClassRecord {
                name: "Mathematics".to_string(),
                input: build_input(40, 36, 75),
            },
            ClassRecord {
                name: "Chemistry".to_string(),
                input: build_input(40, 26, 75),
            },
            ClassRecord {
                name: "Physics".to_string(),
                input: build_input(40, 31, 75),
            },
        ];
        evaluate_roster(&records)
    }

    #[test]
    fn status_mix_counts_and_averages() {
        let summaries = summarize_by_status(&standings());
        assert_eq!(summaries.len(), 3);
        let red = summaries
            .iter()
            .find(|summary| summary.status == Status::Red)
            .expect("one red class");
        assert_eq!(red.count, 1);
        assert!((red.avg_percent - 65.0).abs() < 0.001);
    }

    #[test]
    fn roster_report_lists_riskiest_first() {
        let report = build_roster_report("classes.csv", &standings());
        assert!(report.contains("# Attendance Report"));
        assert!(report.contains("for roster classes.csv"));
        assert!(report.contains("## Status Mix"));
        assert!(report.contains("## Most At-Risk Classes"));
        assert!(report.contains("## Advice"));

        let chemistry = report.find("- Chemistry (red) 65.0%").expect("red line");
        let physics = report.find("- Physics (yellow) 77.5%").expect("yellow line");
        assert!(chemistry < physics);
    }

    #[test]
    fn empty_roster_report_says_so() {
        let report = build_roster_report("classes.csv", &[]);
        assert!(report.contains("No classes in this roster."));
    }

    #[test]
    fn check_report_includes_projection_only_when_requested() {
        let with = build_check_report(&evaluate(&build_input(100, 80, 75), Some(5)));
        assert!(with.contains("## Summary"));
        assert!(with.contains("- Current attendance: 80.0% (yellow)"));
        assert!(with.contains("## Projection"));
        assert!(with.contains("76.19%"));

        let without = build_check_report(&evaluate(&build_input(100, 80, 75), None));
        assert!(!without.contains("## Projection"));
    }
}
