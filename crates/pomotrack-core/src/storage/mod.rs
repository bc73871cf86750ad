mod config;
pub mod database;
mod memory;
pub mod migrations;

pub use config::{Config, LoggingConfig, StorageConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{ConfigError, DatabaseError};
use crate::pomodoro::Pomodoro;

/// Durable storage for pomodoro records.
///
/// The lifecycle manager writes through to a store on every transition that
/// changes a record; callers list records back out for statistics.
pub trait RecordStore {
    /// Persist a new record and assign its id.
    fn create(&self, pomodoro: &mut Pomodoro) -> Result<i64, DatabaseError>;

    /// Overwrite an existing record, matched by id.
    fn update(&self, pomodoro: &Pomodoro) -> Result<(), DatabaseError>;

    /// All records, oldest `start_at` first.
    fn list_all(&self) -> Result<Vec<Pomodoro>, DatabaseError>;

    /// Records starting on the current local calendar day, oldest first.
    fn list_today(&self) -> Result<Vec<Pomodoro>, DatabaseError>;

    fn remove(&self, id: i64) -> Result<(), DatabaseError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn create(&self, pomodoro: &mut Pomodoro) -> Result<i64, DatabaseError> {
        (**self).create(pomodoro)
    }

    fn update(&self, pomodoro: &Pomodoro) -> Result<(), DatabaseError> {
        (**self).update(pomodoro)
    }

    fn list_all(&self) -> Result<Vec<Pomodoro>, DatabaseError> {
        (**self).list_all()
    }

    fn list_today(&self) -> Result<Vec<Pomodoro>, DatabaseError> {
        (**self).list_today()
    }

    fn remove(&self, id: i64) -> Result<(), DatabaseError> {
        (**self).remove(id)
    }
}

/// Returns `~/.config/pomotrack[-dev]/` based on POMOTRACK_ENV.
///
/// Set POMOTRACK_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOTRACK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomotrack-dev")
    } else {
        base_dir.join("pomotrack")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
