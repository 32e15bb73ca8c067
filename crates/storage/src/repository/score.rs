use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::post::PostRepository;
use crate::error::{Result, StorageError};
use crate::models::{PerformancePost, ScoreRecord};
use crate::services::recompute::ScoreStore;

/// Reads posts and writes the cached score columns on `users`.
pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreStore for ScoreRepository<'_> {
    async fn athlete_ids(&self) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar(
            "SELECT user_id FROM users WHERE role = 'athlete' ORDER BY created_at, user_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    async fn posts_for(&self, athlete_id: Uuid) -> Result<Vec<PerformancePost>> {
        PostRepository::new(self.pool).list_by_athlete(athlete_id).await
    }

    async fn store_score(&self, athlete_id: Uuid, record: &ScoreRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET sport_index = $2, composite_score = $3, scored_at = NOW()
            WHERE user_id = $1 AND role = 'athlete'
            "#,
        )
        .bind(athlete_id)
        .bind(record.sport_index as i32)
        .bind(record.composite_score as i32)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
