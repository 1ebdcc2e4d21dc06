//! Repository for per-staff moderation counters.

use super::{Database, DbError};
use sqlx::SqliteConnection;

/// Warn/ban counters for one staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffStats {
    pub bans: i64,
    pub warns: i64,
}

/// Repository for staff counters. Every update touches both the lifetime
/// table (`staffLogs`) and the monthly table (`monthLogs`).
pub struct StaffRepository<'a> {
    db: &'a Database,
}

impl<'a> StaffRepository<'a> {
    /// Create a new staff repository.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Count one warning issued by `staff` on an open connection.
    ///
    /// Called from inside the transaction that records the warning itself.
    pub(super) async fn add_warn(
        &self,
        conn: &mut SqliteConnection,
        staff: &str,
    ) -> Result<(), DbError> {
        for (op, sql) in [
            (
                "staff.add_warn",
                "INSERT INTO staffLogs (staff, bans, warns) VALUES (?, 0, 1) \
                 ON CONFLICT(staff) DO UPDATE SET warns = warns + 1",
            ),
            (
                "staff.add_warn_monthly",
                "INSERT INTO monthLogs (staff, bans, warns) VALUES (?, 0, 1) \
                 ON CONFLICT(staff) DO UPDATE SET warns = warns + 1",
            ),
        ] {
            self.db
                .observe(op, sqlx::query(sql).bind(staff).execute(&mut *conn))
                .await?;
        }

        Ok(())
    }

    /// Lifetime counters for `staff`.
    pub async fn lifetime(&self, staff: &str) -> Result<StaffStats, DbError> {
        self.stats("staff.lifetime", "SELECT bans, warns FROM staffLogs WHERE staff = ?", staff)
            .await
    }

    /// Counters for the current month.
    pub async fn monthly(&self, staff: &str) -> Result<StaffStats, DbError> {
        self.stats("staff.monthly", "SELECT bans, warns FROM monthLogs WHERE staff = ?", staff)
            .await
    }

    async fn stats(&self, op: &'static str, sql: &str, staff: &str) -> Result<StaffStats, DbError> {
        let row = self
            .db
            .observe(
                op,
                sqlx::query_as::<_, (i64, i64)>(sql)
                    .bind(staff)
                    .fetch_optional(self.db.pool()),
            )
            .await?;

        Ok(row
            .map(|(bans, warns)| StaffStats { bans, warns })
            .unwrap_or_default())
    }
}
