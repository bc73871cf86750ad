//! SQLite-based pomodoro storage.
//!
//! Provides persistent storage for pomodoro records and implements
//! [`RecordStore`] for the lifecycle manager.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use tracing::debug;

use super::{data_dir, migrations, Config, RecordStore};
use crate::calendar;
use crate::error::{CoreError, DatabaseError};
use crate::pomodoro::Pomodoro;

/// SQLite database for pomodoro records.
pub struct Database {
    conn: Connection,
}

/// Raw column values, decoded outside the rusqlite row callback.
type RawRow = (i64, String, String, i64);

fn encode_time(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn decode_time(value: &str, column: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Corrupt {
            column: column.to_string(),
            message: format!("invalid datetime '{value}': {e}"),
        })
}

fn decode_row((id, start_at, finish_at, duration): RawRow) -> Result<Pomodoro, DatabaseError> {
    Ok(Pomodoro {
        id,
        start_at: decode_time(&start_at, "start_at")?,
        finish_at: decode_time(&finish_at, "finish_at")?,
        seconds_duration: u64::try_from(duration).map_err(|_| DatabaseError::Corrupt {
            column: "duration".to_string(),
            message: format!("negative duration {duration}"),
        })?,
    })
}

fn to_sql_duration(seconds: u64) -> Result<i64, DatabaseError> {
    i64::try_from(seconds).map_err(|_| {
        DatabaseError::QueryFailed(format!("duration {seconds} exceeds SQLite INTEGER range"))
    })
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database named by `config.storage.database_file` inside the
    /// data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open(config: &Config) -> Result<Self, CoreError> {
        let path = data_dir()?.join(&config.storage.database_file);
        Self::open_at(path).map_err(CoreError::storage("open database"))
    }

    /// Open (creating if needed) the database file at `path`.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        debug!(path = %path.display(), "opened pomodoro database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    fn query(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Pomodoro>, DatabaseError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |row| {
            Ok::<RawRow, rusqlite::Error>((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?;

        let mut pomodoros = Vec::new();
        for row in rows {
            pomodoros.push(decode_row(row?)?);
        }
        Ok(pomodoros)
    }

    /// Records starting within `[from, to)`, oldest first.
    pub fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Pomodoro>, DatabaseError> {
        self.query(
            "SELECT id, start_at, finish_at, duration FROM pomodoros
             WHERE start_at >= ?1 AND start_at < ?2
             ORDER BY start_at, id",
            &[&encode_time(&from), &encode_time(&to)],
        )
    }
}

impl RecordStore for Database {
    fn create(&self, pomodoro: &mut Pomodoro) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO pomodoros (start_at, finish_at, duration) VALUES (?1, ?2, ?3)",
            params![
                encode_time(&pomodoro.start_at),
                encode_time(&pomodoro.finish_at),
                to_sql_duration(pomodoro.seconds_duration)?,
            ],
        )?;
        pomodoro.id = self.conn.last_insert_rowid();
        Ok(pomodoro.id)
    }

    fn update(&self, pomodoro: &Pomodoro) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE pomodoros SET start_at = ?1, finish_at = ?2, duration = ?3 WHERE id = ?4",
            params![
                encode_time(&pomodoro.start_at),
                encode_time(&pomodoro.finish_at),
                to_sql_duration(pomodoro.seconds_duration)?,
                pomodoro.id,
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound(pomodoro.id));
        }
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Pomodoro>, DatabaseError> {
        self.query(
            "SELECT id, start_at, finish_at, duration FROM pomodoros ORDER BY start_at, id",
            &[],
        )
    }

    fn list_today(&self) -> Result<Vec<Pomodoro>, DatabaseError> {
        let (from, to) = calendar::day_bounds(Local::now().date_naive(), &Local);
        self.list_between(from, to)
    }

    fn remove(&self, id: i64) -> Result<(), DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM pomodoros WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 13, h, m, 0).unwrap()
    }

    #[test]
    fn create_then_list() {
        let db = Database::open_memory().unwrap();
        let mut pomodoro = Pomodoro::new(at(9, 0), at(9, 25), 1500);

        let id = db.create(&mut pomodoro).unwrap();
        assert_eq!(pomodoro.id, id);

        let listed = db.list_all().unwrap();
        assert_eq!(listed, vec![pomodoro]);
    }

    #[test]
    fn update_overwrites_duration_and_finish() {
        let db = Database::open_memory().unwrap();
        let mut pomodoro = Pomodoro::new(at(9, 0), at(9, 0), 0);
        db.create(&mut pomodoro).unwrap();

        pomodoro.seconds_duration = 600;
        pomodoro.finish_at = at(9, 10);
        db.update(&pomodoro).unwrap();

        let stored = db.list_all().unwrap();
        assert_eq!(stored[0].seconds_duration, 600);
        assert_eq!(stored[0].finish_at, at(9, 10));
    }

    #[test]
    fn update_and_remove_unknown_ids_fail() {
        let db = Database::open_memory().unwrap();
        let mut ghost = Pomodoro::new(at(9, 0), at(9, 0), 0);
        ghost.id = 99;

        assert!(matches!(db.update(&ghost), Err(DatabaseError::NotFound(99))));
        assert!(matches!(db.remove(99), Err(DatabaseError::NotFound(99))));
    }

    #[test]
    fn list_all_orders_by_start() {
        let db = Database::open_memory().unwrap();
        let mut late = Pomodoro::new(at(15, 0), at(15, 25), 1500);
        let mut early = Pomodoro::new(at(8, 0), at(8, 25), 1500);
        db.create(&mut late).unwrap();
        db.create(&mut early).unwrap();

        let starts: Vec<_> = db.list_all().unwrap().iter().map(|p| p.start_at).collect();
        assert_eq!(starts, vec![at(8, 0), at(15, 0)]);
    }

    #[test]
    fn subsecond_precision_is_dropped() {
        let db = Database::open_memory().unwrap();
        let start = at(9, 0) + Duration::milliseconds(750);
        let mut pomodoro = Pomodoro::new(start, start, 0);
        db.create(&mut pomodoro).unwrap();

        assert_eq!(db.list_all().unwrap()[0].start_at, at(9, 0));
    }

    #[test]
    fn list_between_is_half_open() {
        let db = Database::open_memory().unwrap();
        for start in [at(0, 0), at(12, 0), at(23, 59)] {
            db.create(&mut Pomodoro::new(start, start, 60)).unwrap();
        }
        let mut next_day = Pomodoro::new(at(0, 0) + Duration::days(1), at(0, 0), 60);
        db.create(&mut next_day).unwrap();

        let day = db.list_between(at(0, 0), at(0, 0) + Duration::days(1)).unwrap();
        assert_eq!(day.len(), 3);
    }

    #[test]
    fn list_today_only_returns_today() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        let mut today = Pomodoro::new(now, now, 60);
        let mut last_week = Pomodoro::new(now - Duration::days(7), now - Duration::days(7), 60);
        db.create(&mut today).unwrap();
        db.create(&mut last_week).unwrap();

        let listed = db.list_today().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, today.id);
    }

    #[test]
    fn corrupt_rows_are_reported() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO pomodoros (start_at, finish_at, duration) VALUES ('yesterday', 'now', 5)",
                [],
            )
            .unwrap();

        assert!(matches!(
            db.list_all(),
            Err(DatabaseError::Corrupt { ref column, .. }) if column == "start_at"
        ));
    }
}
