mod manager;
mod record;

pub use manager::{PomodoroManager, Transition};
pub use record::{Pomodoro, TrackedPomodoro};
