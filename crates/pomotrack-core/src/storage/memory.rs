//! In-process record store.
//!
//! Backs tests and short-lived callers that don't need the SQLite file.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;

use super::RecordStore;
use crate::calendar;
use crate::error::DatabaseError;
use crate::pomodoro::Pomodoro;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    records: Vec<Pomodoro>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored copy by id.
    pub fn get(&self, id: i64) -> Option<Pomodoro> {
        self.lock().records.iter().find(|p| p.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sorted(mut records: Vec<Pomodoro>) -> Vec<Pomodoro> {
    records.sort_by_key(|p| (p.start_at, p.id));
    records
}

impl RecordStore for MemoryStore {
    fn create(&self, pomodoro: &mut Pomodoro) -> Result<i64, DatabaseError> {
        let mut inner = self.lock();
        inner.next_id += 1;
        pomodoro.id = inner.next_id;
        inner.records.push(pomodoro.clone());
        Ok(pomodoro.id)
    }

    fn update(&self, pomodoro: &Pomodoro) -> Result<(), DatabaseError> {
        let mut inner = self.lock();
        let stored = inner
            .records
            .iter_mut()
            .find(|p| p.id == pomodoro.id)
            .ok_or(DatabaseError::NotFound(pomodoro.id))?;
        *stored = pomodoro.clone();
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Pomodoro>, DatabaseError> {
        Ok(sorted(self.lock().records.clone()))
    }

    fn list_today(&self) -> Result<Vec<Pomodoro>, DatabaseError> {
        let (from, to) = calendar::day_bounds(Local::now().date_naive(), &Local);
        let today = self
            .lock()
            .records
            .iter()
            .filter(|p| p.start_at >= from && p.start_at < to)
            .cloned()
            .collect();
        Ok(sorted(today))
    }

    fn remove(&self, id: i64) -> Result<(), DatabaseError> {
        let mut inner = self.lock();
        let before = inner.records.len();
        inner.records.retain(|p| p.id != id);
        if inner.records.len() == before {
            return Err(DatabaseError::NotFound(id));
        }
        Ok(())
    }
}
