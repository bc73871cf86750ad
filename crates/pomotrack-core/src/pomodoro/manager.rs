//! Pomodoro lifecycle manager.
//!
//! Consumes focus-timer state changes and keeps exactly one pomodoro open at
//! a time, writing every change through to a [`RecordStore`].
//!
//! ## State Transitions
//!
//! ```text
//! (none | finished) --active--> running --paused--> paused --active--> running
//!                                   \                  /
//!                                    +---finished---> finished
//! ```
//!
//! Time is only accumulated between a resume and the next pause or finish,
//! so paused intervals never count.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::record::{Pomodoro, TrackedPomodoro};
use crate::error::{CoreError, Result, ValidationError};
use crate::events::{StateEvent, TimerKind, TimerState};
use crate::storage::RecordStore;

/// What a single state change did to the tracked pomodoro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transition {
    /// Not a focus-timer event.
    Ignored,
    Started {
        id: i64,
    },
    Resumed {
        id: i64,
    },
    Paused {
        id: i64,
        elapsed_secs: u64,
        total_secs: u64,
    },
    Finished {
        id: i64,
        elapsed_secs: u64,
        total_secs: u64,
    },
    /// Repeated event (already running, paused or finished).
    Unchanged {
        id: i64,
    },
}

/// Tracks the current pomodoro and persists it through `S`.
///
/// Mutating entry points take `&mut self`, so the current record has a single
/// owner; queries and manual entry only need `&self`.
pub struct PomodoroManager<S> {
    store: S,
    current: Option<TrackedPomodoro>,
}

impl<S: RecordStore> PomodoroManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The pomodoro being tracked, if any. May already be finished.
    pub fn current(&self) -> Option<&TrackedPomodoro> {
        self.current.as_ref()
    }

    // ── Event handling ───────────────────────────────────────────────

    /// Handle every event in order until the source is exhausted.
    ///
    /// Failures are logged and do not stop processing.
    pub fn run<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = StateEvent>,
    {
        for event in events {
            self.dispatch(event);
        }
    }

    /// Async counterpart of [`run`](Self::run); returns once every sender
    /// has been dropped.
    pub async fn run_channel(&mut self, mut events: tokio::sync::mpsc::Receiver<StateEvent>) {
        while let Some(event) = events.recv().await {
            self.dispatch(event);
        }
    }

    pub fn handle_state_change(&mut self, event: StateEvent) -> Result<Transition> {
        self.handle_state_change_at(event, Utc::now())
    }

    pub fn handle_state_change_at(
        &mut self,
        event: StateEvent,
        now: DateTime<Utc>,
    ) -> Result<Transition> {
        if event.timer_kind != TimerKind::Focus {
            debug!(%event, "ignoring non-focus timer event");
            return Ok(Transition::Ignored);
        }

        match event.new_state {
            TimerState::Active => self.start_or_resume(now),
            TimerState::Paused => self.pause(now),
            TimerState::Finished => self.finish(now),
        }
    }

    /// Close the running pomodoro, e.g. on shutdown when the timer never
    /// sent a finish. Does nothing if there is no open pomodoro, apart from
    /// retrying a finished record's write that previously failed.
    pub fn finish_running_pomodoro(&mut self) -> Result<Option<Transition>> {
        self.finish_running_pomodoro_at(Utc::now())
    }

    pub fn finish_running_pomodoro_at(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Option<Transition>> {
        let Some(tracked) = self.current.as_mut() else {
            return Ok(None);
        };
        if !tracked.is_finished() {
            return self.finish(now).map(Some);
        }
        if !tracked.is_synced() {
            Self::write_back(&self.store, tracked)?;
        }
        Ok(None)
    }

    fn dispatch(&mut self, event: StateEvent) {
        match self.handle_state_change(event) {
            Ok(transition) => debug!(%event, ?transition, "handled pomodoro state change"),
            Err(err @ CoreError::NoCurrentPomodoro(_)) => {
                warn!(%event, error = %err, "state change without a current pomodoro");
            }
            Err(err) => error!(%event, error = %err, "handle pomodoro state change"),
        }
    }

    fn start_or_resume(&mut self, now: DateTime<Utc>) -> Result<Transition> {
        if let Some(tracked) = self.current.as_mut().filter(|t| !t.is_finished()) {
            let id = tracked.id();
            if tracked.is_running() {
                debug!(id, "pomodoro already running");
                return Ok(Transition::Unchanged { id });
            }
            // Written on the next pause or finish.
            tracked.resume(now);
            debug!(id, "resumed pomodoro");
            return Ok(Transition::Resumed { id });
        }

        if let Some(stale) = self.current.as_mut().filter(|t| !t.is_synced()) {
            Self::write_back(&self.store, stale)?;
        }
        self.current = None;
        let mut pomodoro = Pomodoro::new(now, now, 0);
        self.store
            .create(&mut pomodoro)
            .map_err(CoreError::storage("create pomodoro"))?;

        let id = pomodoro.id;
        info!(id, start_at = %now, "started pomodoro");
        self.current = Some(TrackedPomodoro::started(pomodoro, now));
        Ok(Transition::Started { id })
    }

    fn pause(&mut self, now: DateTime<Utc>) -> Result<Transition> {
        let tracked = self
            .current
            .as_mut()
            .ok_or(CoreError::NoCurrentPomodoro("pause"))?;
        let id = tracked.id();
        if !tracked.is_running() {
            debug!(id, "pomodoro not running; pause ignored");
            if !tracked.is_synced() {
                Self::write_back(&self.store, tracked)?;
            }
            return Ok(Transition::Unchanged { id });
        }

        let elapsed_secs = tracked.flush(now);
        let total_secs = tracked.record().seconds_duration;
        Self::write_back(&self.store, tracked)?;

        debug!(id, elapsed_secs, total_secs, "paused pomodoro");
        Ok(Transition::Paused {
            id,
            elapsed_secs,
            total_secs,
        })
    }

    fn finish(&mut self, now: DateTime<Utc>) -> Result<Transition> {
        let tracked = self
            .current
            .as_mut()
            .ok_or(CoreError::NoCurrentPomodoro("finish"))?;
        let id = tracked.id();
        if tracked.is_finished() {
            debug!(id, "pomodoro already finished");
            if !tracked.is_synced() {
                Self::write_back(&self.store, tracked)?;
            }
            return Ok(Transition::Unchanged { id });
        }

        tracked.mark_finished();
        let elapsed_secs = tracked.flush(now);
        let total_secs = tracked.record().seconds_duration;
        Self::write_back(&self.store, tracked)?;

        info!(id, total_secs, "finished pomodoro");
        Ok(Transition::Finished {
            id,
            elapsed_secs,
            total_secs,
        })
    }

    /// Store `tracked`, remembering a failure so a later event retries the
    /// write. A retry flushes nothing, so it never adds time.
    fn write_back(store: &S, tracked: &mut TrackedPomodoro) -> Result<()> {
        let written = store.update(tracked.record());
        tracked.set_synced(written.is_ok());
        written.map_err(CoreError::storage("update pomodoro"))
    }

    // ── Direct API ───────────────────────────────────────────────────

    /// Persist a fully specified pomodoro, bypassing the event flow.
    pub fn create_new_pomodoro(
        &self,
        start_at: DateTime<Utc>,
        finish_at: DateTime<Utc>,
        seconds_duration: u64,
    ) -> Result<Pomodoro> {
        if finish_at < start_at {
            return Err(ValidationError::InvalidTimeRange {
                start: start_at,
                finish: finish_at,
            }
            .into());
        }

        let mut pomodoro = Pomodoro::new(start_at, finish_at, seconds_duration);
        self.store
            .create(&mut pomodoro)
            .map_err(CoreError::storage("create pomodoro"))?;
        info!(id = pomodoro.id, seconds_duration, "created pomodoro");
        Ok(pomodoro)
    }

    pub fn list_all(&self) -> Result<Vec<Pomodoro>> {
        self.store
            .list_all()
            .map_err(CoreError::storage("list pomodoros"))
    }

    pub fn list_today(&self) -> Result<Vec<Pomodoro>> {
        self.store
            .list_today()
            .map_err(CoreError::storage("list today's pomodoros"))
    }

    pub fn remove(&self, id: i64) -> Result<()> {
        self.store
            .remove(id)
            .map_err(CoreError::storage("remove pomodoro"))?;
        info!(id, "removed pomodoro");
        Ok(())
    }
}
