use crate::models::{
    Advice, AttendanceInput, AttendanceSummary, ClassRecord, ClassStanding, InvalidReason,
    Projection, Status,
};

pub const DEFAULT_MIN_PERCENT: u32 = 75;

/// Margin above the minimum before a standing counts as green.
pub const GREEN_MARGIN: f64 = 5.0;

pub fn build_input(total: i64, attended: i64, min_percent: i64) -> AttendanceInput {
    AttendanceInput {
        total: clamp_count(total),
        attended: clamp_count(attended),
        min_percent: min_percent_or_default(min_percent),
    }
}

pub fn parse_count(raw: &str) -> u32 {
    raw.trim().parse::<i64>().map(clamp_count).unwrap_or(0)
}

pub fn parse_min_percent(raw: &str, fallback: u32) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(value) if (1..=100).contains(&value) => value as u32,
        _ => fallback,
    }
}

pub fn min_percent_or_default(value: i64) -> u32 {
    if (1..=100).contains(&value) {
        value as u32
    } else {
        DEFAULT_MIN_PERCENT
    }
}

pub fn future_misses_or_zero(value: i64) -> u32 {
    clamp_count(value)
}

fn clamp_count(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

pub fn current_percent(input: &AttendanceInput) -> f64 {
    if input.total == 0 {
        return 0.0;
    }
    (input.attended as f64 / input.total as f64) * 100.0
}

pub fn status_for(percent: f64, min_percent: u32) -> Status {
    let floor = min_percent as f64;
    if percent < floor {
        Status::Red
    } else if percent < floor + GREEN_MARGIN {
        Status::Yellow
    } else {
        Status::Green
    }
}

pub fn safe_to_miss(input: &AttendanceInput) -> i64 {
    let total = input.total as i64;
    let attended = input.attended as i64;
    let min = (input.min_percent as i64).max(1);
    (100 * attended - min * total).div_euclid(min)
}

pub fn required_attend(input: &AttendanceInput) -> Option<u32> {
    // 100 - min_percent is zero at a 100% requirement
    if input.min_percent >= 100 {
        return None;
    }
    let total = input.total as i64;
    let attended = input.attended as i64;
    let min = input.min_percent as i64;
    let shortfall = min * total - 100 * attended;
    let gain = 100 - min;
    Some((shortfall + gain - 1).div_euclid(gain).max(0) as u32)
}

pub fn after_one_miss_percent(input: &AttendanceInput) -> f64 {
    (input.attended as f64 / (input.total as f64 + 1.0)) * 100.0
}

pub fn projected_percent(input: &AttendanceInput, future_misses: u32) -> f64 {
    let projected_total = input.total as f64 + future_misses as f64;
    if projected_total == 0.0 {
        return 0.0;
    }
    (input.attended as f64 / projected_total) * 100.0
}

pub fn evaluate(input: &AttendanceInput, future_misses: Option<u32>) -> AttendanceSummary {
    if input.total == 0 || input.attended > input.total {
        let reason = if input.total == 0 {
            InvalidReason::NoClasses
        } else {
            InvalidReason::AttendedExceedsTotal
        };
        return AttendanceSummary {
            input: *input,
            current_percent: 0.0,
            status: Status::Gray,
            advice: Advice::Invalid { reason },
            after_one_miss_percent: 0.0,
            after_one_miss_status: Status::Gray,
            projection: future_misses.map(|misses| Projection {
                future_misses: misses,
                percent: 0.0,
                status: Status::Gray,
            }),
        };
    }

    let percent = current_percent(input);
    let status = status_for(percent, input.min_percent);
    let advice = if status == Status::Red {
        match required_attend(input) {
            Some(classes) => Advice::MustAttend { classes },
            None => Advice::TargetUnreachable,
        }
    } else {
        let spare = safe_to_miss(input);
        if spare < 0 {
            Advice::OnTheEdge
        } else {
            Advice::SafeToMiss {
                classes: spare as u32,
            }
        }
    };

    let next_miss = after_one_miss_percent(input);
    let projection = future_misses.map(|misses| {
        let projected = projected_percent(input, misses);
        Projection {
            future_misses: misses,
            percent: projected,
            status: status_for(projected, input.min_percent),
        }
    });

    AttendanceSummary {
        input: *input,
        current_percent: percent,
        status,
        advice,
        after_one_miss_percent: next_miss,
        after_one_miss_status: status_for(next_miss, input.min_percent),
        projection,
    }
}

pub fn evaluate_roster(records: &[ClassRecord]) -> Vec<ClassStanding> {
    let mut standings: Vec<ClassStanding> = records
        .iter()
        .map(|record| ClassStanding {
            name: record.name.clone(),
            summary: evaluate(&record.input, None),
        })
        .collect();

    standings.sort_by(|a, b| {
        sort_key(&a.summary)
            .partial_cmp(&sort_key(&b.summary))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    standings
}

fn sort_key(summary: &AttendanceSummary) -> (u8, f64) {
    let margin = summary.current_percent - summary.input.min_percent as f64;
    (risk_rank(summary.status), margin)
}

fn risk_rank(status: Status) -> u8 {
    match status {
        Status::Red => 0,
        Status::Yellow => 1,
        Status::Green => 2,
        Status::Gray => 3,
    }
}

pub fn advice_message(advice: &Advice) -> String {
    match advice {
        Advice::SafeToMiss { classes } => format!(
            "You can miss the next {} class{}.",
            classes,
            class_suffix(*classes)
        ),
        Advice::OnTheEdge => "You're on the edge! Don't miss any more classes.".to_string(),
        Advice::MustAttend { classes } => format!(
            "You need to attend the next {} class{} consecutively.",
            classes,
            class_suffix(*classes)
        ),
        Advice::TargetUnreachable => {
            "A 100% requirement cannot be recovered once a class has been missed.".to_string()
        }
        Advice::Invalid { reason } => match reason {
            InvalidReason::NoClasses => "Total classes must be greater than zero.".to_string(),
            InvalidReason::AttendedExceedsTotal => {
                "Attended classes cannot be more than total classes.".to_string()
            }
        },
    }
}

pub fn class_suffix(count: u32) -> &'static str {
    if count == 1 {
        ""
    } else {
        "es"
    }
}
