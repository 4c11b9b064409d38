use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{ExerciseEntry, FromSqliteRow};

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Entries logged by a user, in the order they were created. An unknown
    /// user simply has no entries.
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<ExerciseEntry>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT * FROM exercises WHERE user_id = ? ORDER BY rowid")?;
            let entries = stmt
                .query_map([&user_id], ExerciseEntry::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(
        &self,
        user_id: &str,
        description: &str,
        duration: i64,
        date: NaiveDate,
    ) -> Result<ExerciseEntry> {
        let entry = ExerciseEntry {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            description: description.to_string(),
            duration,
            date,
        };
        let entry_clone = entry.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO exercises (id, user_id, description, duration, date)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    entry_clone.id,
                    entry_clone.user_id,
                    entry_clone.description,
                    entry_clone.duration,
                    entry_clone.date
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(entry)
    }
}
