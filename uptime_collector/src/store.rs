//! SQLite persistence for the instant feed and the daily counters

use crate::errors::{CollectorError, Result};
use crate::records::{DailyRecord, InstantRecord};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS instant_feed (
        time INTEGER NOT NULL,
        up   BOOL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS instant_feed_time ON instant_feed (time);
    CREATE TABLE IF NOT EXISTS daily_averages (
        date       TEXT PRIMARY KEY,
        up_count   INTEGER NOT NULL DEFAULT 0,
        down_count INTEGER NOT NULL DEFAULT 0
    );
";

/// Uptime database. `instant_feed.time` holds unix milliseconds (UTC),
/// `daily_averages.date` the local calendar date of the checks.
pub struct UptimeStore {
    conn: Mutex<Connection>,
}

impl UptimeStore {
    /// Open the database file, creating the tables if needed
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::initialize(conn)
    }

    /// Open a private in-memory database (tests, dry runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CollectorError::Other("uptime store lock poisoned".to_string()))
    }

    /// Record the outcome of one check. The instant row and today's counter
    /// are written in one transaction; nothing is kept if either fails.
    pub fn record_state<Tz: TimeZone>(&self, now: &DateTime<Tz>, up: bool) -> Result<DailyRecord> {
        let day = now.date_naive();
        let date = day.format(DATE_FORMAT).to_string();
        let (up_inc, down_inc): (i64, i64) = if up { (1, 0) } else { (0, 1) };

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO instant_feed (time, up) VALUES (?1, ?2)",
            params![now.timestamp_millis(), up],
        )?;

        tx.execute(
            "INSERT INTO daily_averages (date, up_count, down_count) VALUES (?1, 0, 0)
             ON CONFLICT(date) DO NOTHING",
            params![date],
        )?;

        tx.execute(
            "UPDATE daily_averages
             SET up_count = up_count + ?2, down_count = down_count + ?3
             WHERE date = ?1",
            params![date, up_inc, down_inc],
        )?;

        let (up_count, down_count): (i64, i64) = tx.query_row(
            "SELECT up_count, down_count FROM daily_averages WHERE date = ?1",
            params![date],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        tx.commit()?;

        debug!("Today's checks now: {} up, {} down", up_count, down_count);
        Ok(DailyRecord::new(day, up_count as u64, down_count as u64))
    }

    /// Delete instant rows strictly older than `threshold`
    pub fn delete_instant_before(&self, threshold: DateTime<Utc>) -> Result<usize> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM instant_feed WHERE time < ?1",
            params![threshold.timestamp_millis()],
        )?;
        Ok(deleted)
    }

    /// Instant feed in chronological order
    pub fn instant_records(&self) -> Result<Vec<InstantRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT time, up FROM instant_feed ORDER BY time ASC, rowid ASC")?;

        let rows = stmt.query_map([], |row| {
            let millis: i64 = row.get(0)?;
            let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)
                .ok_or(rusqlite::Error::IntegralValueOutOfRange(0, millis))?;
            Ok(InstantRecord::new(timestamp, row.get(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Daily counters in calendar order
    pub fn daily_records(&self) -> Result<Vec<DailyRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, up_count, down_count FROM daily_averages ORDER BY date ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let date: String = row.get(0)?;
            let day = parse_date(&date)?;
            let up: i64 = row.get(1)?;
            let down: i64 = row.get(2)?;
            Ok(DailyRecord::new(day, up as u64, down as u64))
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

fn parse_date(value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
}
