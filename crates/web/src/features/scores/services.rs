use sqlx::PgPool;
use storage::{
    error::Result,
    models::ScoreRecord,
    repository::score::ScoreRepository,
    services::recompute::{self, BatchReport},
};
use uuid::Uuid;

/// Rescore every athlete and persist the cached values
pub async fn recompute_all(pool: &PgPool) -> Result<BatchReport> {
    recompute::recompute_all(&ScoreRepository::new(pool)).await
}

pub async fn refresh_athlete(pool: &PgPool, athlete_id: Uuid) -> Result<ScoreRecord> {
    recompute::refresh_athlete(&ScoreRepository::new(pool), athlete_id).await
}
