pub mod completions;
pub mod config;
pub mod pomodoro;
pub mod stats;
pub mod track;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
