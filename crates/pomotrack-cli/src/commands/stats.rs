use chrono::Local;
use pomotrack_core::{stats, Config, Database, PomodoroManager};

use super::CommandResult;

pub fn run(config: &Config, today: bool) -> CommandResult {
    let manager = PomodoroManager::new(Database::open(config)?);
    let pomodoros = if today {
        manager.list_today()?
    } else {
        manager.list_all()?
    };

    let summary = stats::summarize(&pomodoros, &Local::now());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
