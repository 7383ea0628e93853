//! SQLite-backed report store.
//!
//! One price per (user, day, day_part) slot, plus the single
//! last-maintenance timestamp. The store is owned by the bot actor, which
//! serializes every call; nothing here needs its own locking.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use stonks::{Day, DayPart, Report};

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(String),
    #[error("store is closed")]
    Closed,
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Owns the SQLite database file.
///
/// `dump` and `truncate` operate on the raw file, so the pool is closed
/// around them and the store reopened afterwards.
pub struct ReportStore {
    path: PathBuf,
    pool: Option<SqlitePool>,
}

impl ReportStore {
    pub async fn open(path: &Path) -> Result<ReportStore, PersistenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut store = ReportStore {
            path: path.to_path_buf(),
            pool: None,
        };
        store.reopen().await?;
        Ok(store)
    }

    /// Connect (or reconnect) and apply migrations.
    pub async fn reopen(&mut self) -> Result<(), PersistenceError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", self.path.display()))
            .map_err(sqlx::Error::from)?
            .create_if_missing(true)
            // Rollback journal keeps the database in a single file, which
            // dump() snapshots as-is.
            .journal_mode(SqliteJournalMode::Delete)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| PersistenceError::Migration(e.to_string()))?;

        self.pool = Some(pool);
        Ok(())
    }

    pub async fn close(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.close().await;
        }
    }

    fn pool(&self) -> Result<&SqlitePool, PersistenceError> {
        self.pool.as_ref().ok_or(PersistenceError::Closed)
    }

    /// Submit a price for the report's slot.
    ///
    /// Returns the previously stored price, if any. An existing price is
    /// only overwritten when `replace` is true; otherwise the store is
    /// left untouched and the caller decides what the collision means.
    pub async fn submit(
        &self,
        user: i64,
        report: &Report,
        replace: bool,
    ) -> Result<Option<u32>, PersistenceError> {
        let pool = self.pool()?;
        let day = report.day.index() as i64;
        let day_part = report.day_part.index() as i64;

        let old: Option<(i64,)> =
            sqlx::query_as("SELECT price FROM reports WHERE user = ? AND day = ? AND day_part = ?")
                .bind(user)
                .bind(day)
                .bind(day_part)
                .fetch_optional(pool)
                .await?;

        match old {
            None => {
                sqlx::query("INSERT INTO reports (user, day, day_part, price) VALUES (?, ?, ?, ?)")
                    .bind(user)
                    .bind(day)
                    .bind(day_part)
                    .bind(report.price as i64)
                    .execute(pool)
                    .await?;
                Ok(None)
            }
            Some((old_price,)) => {
                if replace {
                    sqlx::query(
                        "UPDATE reports SET price = ? WHERE user = ? AND day = ? AND day_part = ?",
                    )
                    .bind(report.price as i64)
                    .bind(user)
                    .bind(day)
                    .bind(day_part)
                    .execute(pool)
                    .await?;
                }
                Ok(Some(old_price as u32))
            }
        }
    }

    /// All of a user's reports for the current week, slot order.
    pub async fn user_reports(&self, user: i64) -> Result<Vec<Report>, PersistenceError> {
        let rows: Vec<(i64, i64, i64)> = sqlx::query_as(
            "SELECT day, day_part, price FROM reports WHERE user = ? ORDER BY day, day_part",
        )
        .bind(user)
        .fetch_all(self.pool()?)
        .await?;

        rows.into_iter()
            .map(|(day, day_part, price)| {
                let day = Day::from_index(day as u8)
                    .ok_or_else(|| PersistenceError::Corrupt(format!("day {day}")))?;
                let day_part = DayPart::from_index(day_part as u8)
                    .ok_or_else(|| PersistenceError::Corrupt(format!("day_part {day_part}")))?;
                Ok(Report::new(day, day_part, price as u32))
            })
            .collect()
    }

    /// Last maintenance timestamp; 0 means never.
    pub async fn last_maintenance(&self) -> Result<i64, PersistenceError> {
        let row: (i64,) = sqlx::query_as("SELECT last_check_ts FROM maintenance")
            .fetch_one(self.pool()?)
            .await?;
        Ok(row.0)
    }

    pub async fn set_last_maintenance(&self, ts: i64) -> Result<(), PersistenceError> {
        sqlx::query("UPDATE maintenance SET last_check_ts = ?")
            .bind(ts)
            .execute(self.pool()?)
            .await?;
        Ok(())
    }

    /// Raw snapshot of the database file.
    ///
    /// If the store is open it is closed for the read and reopened after,
    /// so the snapshot is a consistent single file.
    pub async fn dump(&mut self) -> Result<Vec<u8>, PersistenceError> {
        let was_open = self.pool.is_some();
        if was_open {
            self.close().await;
        }
        let bytes = tokio::fs::read(&self.path).await.map_err(PersistenceError::Io);
        if was_open {
            self.reopen().await?;
        }
        bytes
    }

    /// Truncate the database file to zero bytes. The schema is re-created
    /// by the migrations on the next (re)open.
    pub async fn truncate(&mut self) -> Result<(), PersistenceError> {
        let was_open = self.pool.is_some();
        if was_open {
            self.close().await;
        }
        tokio::fs::File::create(&self.path).await?;
        if was_open {
            self.reopen().await?;
        }
        Ok(())
    }
}
