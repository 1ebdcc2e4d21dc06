//! Repository for user infractions (warnings and staff notes).

use super::{Database, DbError};
use crate::platform::{User, UserId};

/// A recorded infraction.
///
/// Warnings are numbered per user starting at 1. Notes carry number 0 and
/// do not count towards the warning total.
#[derive(Debug, Clone)]
pub struct Infraction {
    pub dbid: i64,
    pub user_id: UserId,
    pub username: String,
    pub number: i64,
    /// Unix timestamp (seconds).
    pub date: i64,
    pub message: String,
    pub staff: String,
}

impl Infraction {
    /// Whether this is a staff note rather than a warning.
    pub fn is_note(&self) -> bool {
        self.number == 0
    }
}

/// Repository for infraction operations.
pub struct InfractionRepository<'a> {
    db: &'a Database,
}

impl<'a> InfractionRepository<'a> {
    /// Create a new infraction repository.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Record a warning and count it for `staff`.
    ///
    /// The warning's number is one past the user's current count. The
    /// infraction row and both staff counters are written in one
    /// transaction.
    pub async fn record_warning(
        &self,
        user: &User,
        message: &str,
        staff: &str,
    ) -> Result<Infraction, DbError> {
        let now = chrono::Utc::now().timestamp();
        let user_id = user.id.get() as i64;

        let mut tx = self
            .db
            .observe("infractions.begin", self.db.pool().begin())
            .await?;

        let (dbid, number) = self
            .db
            .observe(
                "infractions.record_warning",
                sqlx::query_as::<_, (i64, i64)>(
                    r#"
                    INSERT INTO badeggs (id, username, num, date, message, staff)
                    VALUES (?, ?, (SELECT COUNT(*) FROM badeggs WHERE id = ? AND num > 0) + 1, ?, ?, ?)
                    RETURNING dbid, num
                    "#,
                )
                .bind(user_id)
                .bind(&user.name)
                .bind(user_id)
                .bind(now)
                .bind(message)
                .bind(staff)
                .fetch_one(&mut *tx),
            )
            .await?;

        self.db.staff().add_warn(&mut tx, staff).await?;
        self.db.observe("infractions.commit", tx.commit()).await?;

        Ok(Infraction {
            dbid,
            user_id: user.id,
            username: user.name.clone(),
            number,
            date: now,
            message: message.to_string(),
            staff: staff.to_string(),
        })
    }

    /// Record a staff note about a user.
    pub async fn record_note(
        &self,
        user: &User,
        message: &str,
        staff: &str,
    ) -> Result<Infraction, DbError> {
        let now = chrono::Utc::now().timestamp();

        let dbid = self
            .db
            .observe(
                "infractions.record_note",
                sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO badeggs (id, username, num, date, message, staff)
                    VALUES (?, ?, 0, ?, ?, ?)
                    RETURNING dbid
                    "#,
                )
                .bind(user.id.get() as i64)
                .bind(&user.name)
                .bind(now)
                .bind(message)
                .bind(staff)
                .fetch_one(self.db.pool()),
            )
            .await?;

        Ok(Infraction {
            dbid,
            user_id: user.id,
            username: user.name.clone(),
            number: 0,
            date: now,
            message: message.to_string(),
            staff: staff.to_string(),
        })
    }

    /// All infractions recorded for a user, oldest first.
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<Infraction>, DbError> {
        let rows = self
            .db
            .observe(
                "infractions.for_user",
                sqlx::query_as::<_, (i64, i64, String, i64, i64, String, String)>(
                    r#"
                    SELECT dbid, id, username, num, date, message, staff
                    FROM badeggs
                    WHERE id = ?
                    ORDER BY dbid
                    "#,
                )
                .bind(user_id.get() as i64)
                .fetch_all(self.db.pool()),
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(
                |(dbid, id, username, number, date, message, staff)| Infraction {
                    dbid,
                    user_id: UserId(id as u64),
                    username,
                    number,
                    date,
                    message,
                    staff,
                },
            )
            .collect())
    }

    /// Number of warnings (not notes) recorded for a user.
    pub async fn count_warnings(&self, user_id: UserId) -> Result<i64, DbError> {
        self.db
            .observe(
                "infractions.count_warnings",
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM badeggs WHERE id = ? AND num > 0",
                )
                .bind(user_id.get() as i64)
                .fetch_one(self.db.pool()),
            )
            .await
    }
}
