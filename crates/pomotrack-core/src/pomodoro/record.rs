use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A persisted pomodoro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pomodoro {
    /// Assigned by the record store; 0 until the record has been created.
    pub id: i64,
    pub start_at: DateTime<Utc>,
    pub finish_at: DateTime<Utc>,
    /// Accumulated active (non-paused) seconds.
    pub seconds_duration: u64,
}

impl Pomodoro {
    pub fn new(start_at: DateTime<Utc>, finish_at: DateTime<Utc>, seconds_duration: u64) -> Self {
        Self {
            id: 0,
            start_at,
            finish_at,
            seconds_duration,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    pub fn duration(&self) -> Duration {
        Duration::seconds(i64::try_from(self.seconds_duration).unwrap_or(i64::MAX))
    }
}

/// Runtime wrapper around the pomodoro currently being tracked.
///
/// `last_resume_at` is `Some` while the focus timer runs and `None` while it
/// is paused, so a flush can only ever count time spent running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedPomodoro {
    record: Pomodoro,
    last_resume_at: Option<DateTime<Utc>>,
    finished: bool,
    /// The store has not seen the latest flush.
    unsynced: bool,
}

impl TrackedPomodoro {
    pub(crate) fn started(record: Pomodoro, now: DateTime<Utc>) -> Self {
        Self {
            record,
            last_resume_at: Some(now),
            finished: false,
            unsynced: false,
        }
    }

    pub fn record(&self) -> &Pomodoro {
        &self.record
    }

    pub fn id(&self) -> i64 {
        self.record.id
    }

    pub fn last_resume_at(&self) -> Option<DateTime<Utc>> {
        self.last_resume_at
    }

    pub fn is_running(&self) -> bool {
        !self.finished && self.last_resume_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the stored copy matches this record.
    pub fn is_synced(&self) -> bool {
        !self.unsynced
    }

    pub(crate) fn set_synced(&mut self, synced: bool) {
        self.unsynced = !synced;
    }

    pub(crate) fn resume(&mut self, now: DateTime<Utc>) {
        self.last_resume_at = Some(now);
    }

    pub(crate) fn mark_finished(&mut self) {
        self.finished = true;
    }

    /// Adds whole seconds elapsed since the last resume and moves `finish_at`
    /// to `now`. Returns the seconds added.
    pub(crate) fn flush(&mut self, now: DateTime<Utc>) -> u64 {
        let elapsed = self
            .last_resume_at
            .take()
            .map(|resumed| u64::try_from((now - resumed).num_seconds()).unwrap_or(0))
            .unwrap_or(0);

        self.record.seconds_duration = self.record.seconds_duration.saturating_add(elapsed);
        self.record.finish_at = now;
        elapsed
    }
}
