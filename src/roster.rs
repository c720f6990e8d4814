use std::path::Path;

use anyhow::Context;

use crate::attendance;
use crate::models::{AttendanceInput, ClassRecord};

#[derive(serde::Deserialize)]
struct RosterRow {
    name: String,
    total: String,
    attended: String,
    #[serde(default)]
    min_percent: Option<String>,
}

pub fn load_roster(path: &Path, default_min_percent: u32) -> anyhow::Result<Vec<ClassRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open roster {}", path.display()))?;
    let mut records = Vec::new();

    for result in reader.deserialize::<RosterRow>() {
        let row = result.with_context(|| format!("malformed roster row in {}", path.display()))?;
        let min_percent = row
            .min_percent
            .as_deref()
            .map(|cell| attendance::parse_min_percent(cell, default_min_percent))
            .unwrap_or(default_min_percent);

        records.push(ClassRecord {
            name: row.name,
            input: AttendanceInput {
                total: attendance::parse_count(&row.total),
                attended: attendance::parse_count(&row.attended),
                min_percent,
            },
        });
    }

    Ok(records)
}

pub fn write_sample_roster(path: &Path) -> anyhow::Result<()> {
    let rows = [
        ("Mathematics", "40", "36", ""),
        ("Physics", "40", "31", ""),
        ("Chemistry", "40", "26", ""),
        ("Statistics", "30", "24", "80"),
    ];

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(["name", "total", "attended", "min_percent"])?;
    for (name, total, attended, min_percent) in rows {
        writer.write_record([name, total, attended, min_percent])?;
    }
    writer.flush()?;
    Ok(())
}
