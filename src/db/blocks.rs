//! Repository for the block list.

use super::{Database, DbError};
use crate::platform::UserId;

/// Repository for block list operations.
pub struct BlockRepository<'a> {
    db: &'a Database,
}

impl<'a> BlockRepository<'a> {
    /// Create a new block repository.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Block a user. Returns false if they were already blocked.
    pub async fn add(&self, user_id: UserId) -> Result<bool, DbError> {
        let result = self
            .db
            .observe(
                "blocks.add",
                sqlx::query("INSERT OR IGNORE INTO blocks (id) VALUES (?)")
                    .bind(user_id.get() as i64)
                    .execute(self.db.pool()),
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Unblock a user. Returns false if they were not blocked.
    pub async fn remove(&self, user_id: UserId) -> Result<bool, DbError> {
        let result = self
            .db
            .observe(
                "blocks.remove",
                sqlx::query("DELETE FROM blocks WHERE id = ?")
                    .bind(user_id.get() as i64)
                    .execute(self.db.pool()),
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether a user is blocked.
    pub async fn is_blocked(&self, user_id: UserId) -> Result<bool, DbError> {
        let count = self
            .db
            .observe(
                "blocks.is_blocked",
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blocks WHERE id = ?")
                    .bind(user_id.get() as i64)
                    .fetch_one(self.db.pool()),
            )
            .await?;

        Ok(count > 0)
    }
}
