//! Database module for persistent storage.
//!
//! Provides async SQLite database access using SQLx for:
//! - Infractions (warnings and notes) per user
//! - Staff warn/ban counters, lifetime and monthly
//! - The block list
//!
//! A [`Database`] handle is cheap to clone. Each clone carries the tracing
//! span of whoever owns it, so queries run on behalf of a command invocation
//! log under that invocation's uuid.

mod blocks;
mod infractions;
mod staff;

pub use blocks::BlockRepository;
pub use infractions::{Infraction, InfractionRepository};
pub use staff::{StaffRepository, StaffStats};

use sqlx::SqlitePool;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use std::future::Future;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{Instrument, Span, error, info, trace, warn};

static MEMDB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Queries slower than this are logged at warn.
const SLOW_QUERY: Duration = Duration::from_millis(200);

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("integrity check failed: {0}")]
    Integrity(String),
}

/// Database handle with connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    span: Span,
}

impl Database {
    /// Path that selects a private in-memory database.
    pub const MEMORY: &'static str = ":memory:";

    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
    const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
    const IDLE_TIMEOUT: Duration = Duration::from_secs(60);
    const MAX_FILE_CONNECTIONS: u32 = 5;

    /// Open the database at `path`, applying pending migrations.
    ///
    /// [`Database::MEMORY`] opens a fresh in-memory database. It lives on a
    /// single connection that is never recycled.
    pub async fn new(path: &str) -> Result<Self, DbError> {
        let pool_options = SqlitePoolOptions::new().acquire_timeout(Self::ACQUIRE_TIMEOUT);

        let pool = if path == Self::MEMORY {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(memory_options())
                .await?
        } else {
            pool_options
                .max_connections(Self::MAX_FILE_CONNECTIONS)
                .idle_timeout(Self::IDLE_TIMEOUT)
                .connect_with(file_options(Path::new(path), Self::BUSY_TIMEOUT))
                .await?
        };
        info!(path, "Database connected");

        sqlx::migrate!("./migrations").run(&pool).await?;
        check_integrity(&pool).await?;

        Ok(Self {
            pool,
            span: Span::none(),
        })
    }

    /// Derive a handle whose queries log inside `span`.
    ///
    /// The connection pool is shared with the parent handle.
    pub fn with_span(&self, span: Span) -> Self {
        Self {
            pool: self.pool.clone(),
            span,
        }
    }

    /// Get reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get infraction repository.
    pub fn infractions(&self) -> InfractionRepository<'_> {
        InfractionRepository::new(self)
    }

    /// Get staff counter repository.
    pub fn staff(&self) -> StaffRepository<'_> {
        StaffRepository::new(self)
    }

    /// Get block list repository.
    pub fn blocks(&self) -> BlockRepository<'_> {
        BlockRepository::new(self)
    }

    /// Run a query inside this handle's span and log how it went.
    ///
    /// Failures log at error, queries over [`SLOW_QUERY`] at warn and
    /// everything else at trace.
    pub(crate) async fn observe<T, F>(&self, op: &'static str, query: F) -> Result<T, DbError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        async move {
            let start = Instant::now();
            let result = query.await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Err(e) => error!(op, elapsed_ms, error = %e, "query failed"),
                Ok(_) if elapsed_ms >= SLOW_QUERY.as_millis() as u64 => {
                    warn!(op, elapsed_ms, "slow query")
                }
                Ok(_) => trace!(op, elapsed_ms, "sql query"),
            }

            result.map_err(DbError::from)
        }
        .instrument(self.span.clone())
        .await
    }
}

/// Options for a uniquely named shared-cache in-memory database.
fn memory_options() -> SqliteConnectOptions {
    let id = MEMDB_COUNTER.fetch_add(1, Ordering::Relaxed);
    SqliteConnectOptions::new()
        .filename(format!(
            "file:bouncer-memdb-{}-{id}?mode=memory&cache=shared",
            std::process::id()
        ))
        .shared_cache(true)
        .create_if_missing(true)
}

/// Options for an on-disk database in WAL mode. Creates the parent
/// directory when it is missing.
fn file_options(path: &Path, busy_timeout: Duration) -> SqliteConnectOptions {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty())
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        warn!(path = %dir.display(), error = %e, "Failed to create database directory");
    }

    SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(busy_timeout)
}

async fn check_integrity(pool: &SqlitePool) -> Result<(), DbError> {
    let result: String = sqlx::query_scalar("PRAGMA integrity_check")
        .fetch_one(pool)
        .await?;
    if result != "ok" {
        error!(integrity_check = %result, "Database integrity check failed");
        return Err(DbError::Integrity(result));
    }
    Ok(())
}
