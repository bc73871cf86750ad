//! # pomotrack Core Library
//!
//! Tracks focused work intervals ("pomodoros") from timer state changes and
//! derives statistics from the recorded time. The `pomotrack` CLI is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Lifecycle manager**: consumes ordered focus-timer events, keeps the
//!   single in-progress pomodoro and accumulates only active seconds
//! - **Storage**: the [`RecordStore`] seam, with SQLite and in-memory
//!   implementations, plus TOML-based configuration
//! - **Statistics**: pure functions over record lists (total hours, active
//!   days, hours per weekday of the current week)
//!
//! ## Key Components
//!
//! - [`PomodoroManager`]: event-driven lifecycle state machine
//! - [`Database`]: SQLite record store
//! - [`Config`]: application configuration management
//! - [`stats`]: aggregate views

pub mod calendar;
pub mod error;
pub mod events;
pub mod pomodoro;
pub mod stats;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::{StateEvent, TimerKind, TimerState};
pub use pomodoro::{Pomodoro, PomodoroManager, TrackedPomodoro, Transition};
pub use stats::Summary;
pub use storage::{Config, Database, MemoryStore, RecordStore};
