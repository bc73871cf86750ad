use chrono::{DateTime, Utc};
use clap::Args;
use pomotrack_core::{Config, Database, PomodoroManager};

use super::CommandResult;

#[derive(Args)]
pub struct AddArgs {
    /// Start time (RFC 3339, e.g. 2024-05-13T09:00:00+02:00)
    #[arg(long, value_parser = parse_time)]
    start: DateTime<Utc>,
    /// Finish time (RFC 3339)
    #[arg(long, value_parser = parse_time)]
    finish: DateTime<Utc>,
    /// Focused seconds; defaults to the time between start and finish
    #[arg(long)]
    duration: Option<u64>,
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 time '{value}': {e}"))
}

fn open(config: &Config) -> Result<PomodoroManager<Database>, Box<dyn std::error::Error>> {
    Ok(PomodoroManager::new(Database::open(config)?))
}

pub fn add(config: &Config, args: AddArgs) -> CommandResult {
    let manager = open(config)?;
    let duration = args.duration.unwrap_or_else(|| {
        u64::try_from((args.finish - args.start).num_seconds()).unwrap_or(0)
    });

    let pomodoro = manager.create_new_pomodoro(args.start, args.finish, duration)?;
    println!("{}", serde_json::to_string_pretty(&pomodoro)?);
    Ok(())
}

pub fn list(config: &Config, today: bool) -> CommandResult {
    let manager = open(config)?;
    let pomodoros = if today {
        manager.list_today()?
    } else {
        manager.list_all()?
    };
    println!("{}", serde_json::to_string_pretty(&pomodoros)?);
    Ok(())
}

pub fn remove(config: &Config, id: i64) -> CommandResult {
    open(config)?.remove(id)?;
    println!("removed pomodoro {id}");
    Ok(())
}
