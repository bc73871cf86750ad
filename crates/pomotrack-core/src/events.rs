use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Which timer emitted a state change. Only focus timers drive tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    Focus,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Active,
    Paused,
    Finished,
}

/// One state transition delivered by the timer.
///
/// Events arrive in order from a single producer; duplicates are possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEvent {
    pub timer_kind: TimerKind,
    pub new_state: TimerState,
}

impl StateEvent {
    pub fn new(timer_kind: TimerKind, new_state: TimerState) -> Self {
        Self {
            timer_kind,
            new_state,
        }
    }

    pub fn focus(new_state: TimerState) -> Self {
        Self::new(TimerKind::Focus, new_state)
    }
}

impl TimerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerKind::Focus => "focus",
            TimerKind::Break => "break",
        }
    }
}

impl TimerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Active => "active",
            TimerState::Paused => "paused",
            TimerState::Finished => "finished",
        }
    }
}

impl fmt::Display for StateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.timer_kind.as_str(), self.new_state.as_str())
    }
}

/// Parses `"<kind> <state>"`, e.g. `"focus paused"`. Case-insensitive.
impl FromStr for StateEvent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidEvent(s.to_string());
        let mut parts = s.split_whitespace();
        let (Some(kind), Some(state), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let timer_kind = match kind.to_lowercase().as_str() {
            "focus" => TimerKind::Focus,
            "break" => TimerKind::Break,
            _ => return Err(invalid()),
        };
        let new_state = match state.to_lowercase().as_str() {
            "active" | "start" | "resume" => TimerState::Active,
            "paused" | "pause" => TimerState::Paused,
            "finished" | "finish" | "stop" => TimerState::Finished,
            _ => return Err(invalid()),
        };

        Ok(Self::new(timer_kind, new_state))
    }
}
