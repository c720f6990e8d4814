use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};

mod attendance;
mod models;
mod report;
mod roster;

use models::AttendanceSummary;

#[derive(Parser)]
#[command(name = "attendance-pro")]
#[command(about = "Attendance calculator and planner for class requirements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a single class standing
    Check {
        #[arg(long, default_value_t = 0)]
        total: i64,
        #[arg(long, default_value_t = 0)]
        attended: i64,
        #[arg(long, default_value_t = 75)]
        min_percent: i64,
        #[arg(long)]
        miss: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// Evaluate every class in a roster CSV, riskiest first
    Roster {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value_t = 75)]
        min_percent: i64,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    #[command(group(
        ArgGroup::new("source")
            .args(["csv", "total"])
            .multiple(false)
    ))]
    Report {
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        total: i64,
        #[arg(long, default_value_t = 0, conflicts_with = "csv")]
        attended: i64,
        #[arg(long, default_value_t = 75)]
        min_percent: i64,
        #[arg(long, conflicts_with = "csv")]
        miss: Option<i64>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Write a starter roster CSV
    Sample {
        #[arg(long, default_value = "classes.csv")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            total,
            attended,
            min_percent,
            miss,
            json,
        } => {
            let input = attendance::build_input(total, attended, min_percent);
            let misses = miss.map(attendance::future_misses_or_zero);
            let summary = attendance::evaluate(&input, misses);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
        Commands::Roster {
            csv,
            min_percent,
            limit,
            json,
        } => {
            let default_min = attendance::min_percent_or_default(min_percent);
            let records = roster::load_roster(&csv, default_min)?;
            let standings = attendance::evaluate_roster(&records);

            if standings.is_empty() {
                println!("No classes found in {}.", csv.display());
                return Ok(());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            } else {
                println!("Classes by attendance risk:");
                for standing in standings.iter().take(limit) {
                    println!(
                        "- {} ({}) {:.1}% attended {}/{}: {}",
                        standing.name,
                        standing.summary.status,
                        standing.summary.current_percent,
                        standing.summary.input.attended,
                        standing.summary.input.total,
                        attendance::advice_message(&standing.summary.advice)
                    );
                }
            }
        }
        Commands::Report {
            csv,
            total,
            attended,
            min_percent,
            miss,
            out,
        } => {
            let report = match csv {
                Some(path) => {
                    let default_min = attendance::min_percent_or_default(min_percent);
                    let records = roster::load_roster(&path, default_min)?;
                    let standings = attendance::evaluate_roster(&records);
                    report::build_roster_report(&path.display().to_string(), &standings)
                }
                None => {
                    let input = attendance::build_input(total, attended, min_percent);
                    let misses = miss.map(attendance::future_misses_or_zero);
                    report::build_check_report(&attendance::evaluate(&input, misses))
                }
            };

            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Sample { out } => {
            roster::write_sample_roster(&out)?;
            println!("Sample roster written to {}.", out.display());
        }
    }

    Ok(())
}

fn print_summary(summary: &AttendanceSummary) {
    println!(
        "Current attendance: {:.1}% ({})",
        summary.current_percent, summary.status
    );
    println!(
        "After one more miss: {:.1}% ({})",
        summary.after_one_miss_percent, summary.after_one_miss_status
    );
    println!("{}", attendance::advice_message(&summary.advice));

    if let Some(projection) = &summary.projection {
        println!(
            "Projected after missing {} more class{}: {:.2}% ({})",
            projection.future_misses,
            attendance::class_suffix(projection.future_misses),
            projection.percent,
            projection.status
        );
    }
}
