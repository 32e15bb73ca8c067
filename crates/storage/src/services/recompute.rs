use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::scoring;
use crate::error::Result;
use crate::models::{PerformancePost, ScoreRecord};

/// Persistence seam for score recomputation.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn athlete_ids(&self) -> Result<Vec<Uuid>>;

    async fn posts_for(&self, athlete_id: Uuid) -> Result<Vec<PerformancePost>>;

    async fn store_score(&self, athlete_id: Uuid, record: &ScoreRecord) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct BatchReport {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failed_athletes: Vec<Uuid>,
}

/// Recomputes one athlete's record from its posts and overwrites the cache.
pub async fn refresh_athlete<S>(store: &S, athlete_id: Uuid) -> Result<ScoreRecord>
where
    S: ScoreStore + ?Sized,
{
    let posts = store.posts_for(athlete_id).await?;
    let record = scoring::score_posts(&posts);
    store.store_score(athlete_id, &record).await?;

    tracing::debug!(
        %athlete_id,
        sport_index = record.sport_index,
        composite_score = record.composite_score,
        "score refreshed"
    );

    Ok(record)
}

/// Recomputes every athlete. A failing athlete is logged and counted, never fatal.
pub async fn recompute_all<S>(store: &S) -> Result<BatchReport>
where
    S: ScoreStore + ?Sized,
{
    let athlete_ids = store.athlete_ids().await?;
    tracing::info!(athletes = athlete_ids.len(), "recomputing scores");

    let mut report = BatchReport::default();
    for athlete_id in athlete_ids {
        report.processed += 1;
        match refresh_athlete(store, athlete_id).await {
            Ok(_) => report.succeeded += 1,
            Err(e) => {
                tracing::warn!(%athlete_id, error = %e, "score recomputation failed");
                report.failed += 1;
                report.failed_athletes.push(athlete_id);
            }
        }
    }

    tracing::info!(
        processed = report.processed,
        succeeded = report.succeeded,
        failed = report.failed,
        "score recomputation finished"
    );

    Ok(report)
}

/// Refresh that follows a write the caller has already committed. A failure
/// only leaves the cache stale until the next refresh, so it is logged and
/// reported as `None` instead of failing the write.
pub async fn refresh_after_write<S>(store: &S, athlete_id: Uuid) -> Option<ScoreRecord>
where
    S: ScoreStore + ?Sized,
{
    match refresh_athlete(store, athlete_id).await {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(%athlete_id, error = %e, "score refresh after write failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        posts: HashMap<Uuid, Vec<PerformancePost>>,
        order: Vec<Uuid>,
        broken: Option<Uuid>,
        stored: Mutex<HashMap<Uuid, ScoreRecord>>,
    }

    impl MemoryStore {
        fn add_athlete(&mut self, ratings: &[f64]) -> Uuid {
            let athlete_id = Uuid::new_v4();
            let posts = ratings
                .iter()
                .map(|r| PerformancePost {
                    post_id: Uuid::new_v4(),
                    athlete_id,
                    created_at: NaiveDate::from_ymd_opt(2025, 2, 1)
                        .unwrap()
                        .and_hms_opt(9, 0, 0)
                        .unwrap(),
                    metrics: json!({ "technique": r }).as_object().cloned().unwrap(),
                    summary: None,
                    media_ref: None,
                })
                .collect();
            self.posts.insert(athlete_id, posts);
            self.order.push(athlete_id);
            athlete_id
        }
    }

    #[async_trait]
    impl ScoreStore for MemoryStore {
        async fn athlete_ids(&self) -> Result<Vec<Uuid>> {
            Ok(self.order.clone())
        }

        async fn posts_for(&self, athlete_id: Uuid) -> Result<Vec<PerformancePost>> {
            if self.broken == Some(athlete_id) {
                return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
            }
            self.posts
                .get(&athlete_id)
                .cloned()
                .ok_or(StorageError::NotFound)
        }

        async fn store_score(&self, athlete_id: Uuid, record: &ScoreRecord) -> Result<()> {
            self.stored
                .lock()
                .unwrap()
                .insert(athlete_id, record.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_batch_continues_past_failures() {
        let mut store = MemoryStore::default();
        let first = store.add_athlete(&[8.0, 9.0, 7.0]);
        let broken = store.add_athlete(&[5.0]);
        let last = store.add_athlete(&[]);
        store.broken = Some(broken);

        let report = recompute_all(&store).await.unwrap();

        assert_eq!(report.processed, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failed_athletes, vec![broken]);

        let stored = store.stored.lock().unwrap();
        assert_eq!(stored[&first].sport_index, 800);
        assert_eq!(stored[&first].composite_score, 600);
        assert_eq!(stored[&last].composite_score, 150);
        assert!(!stored.contains_key(&broken));
    }

    #[tokio::test]
    async fn test_refresh_is_pure_recomputation() {
        let mut store = MemoryStore::default();
        let athlete = store.add_athlete(&[6.0, 6.0]);

        let first = refresh_athlete(&store, athlete).await.unwrap();
        let second = refresh_athlete(&store, athlete).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.sport_index, 540);
    }

    #[tokio::test]
    async fn test_refresh_after_write_swallows_failures() {
        let mut store = MemoryStore::default();
        let healthy = store.add_athlete(&[7.0]);
        let broken = store.add_athlete(&[7.0]);
        store.broken = Some(broken);

        assert!(refresh_after_write(&store, healthy).await.is_some());
        assert!(refresh_after_write(&store, broken).await.is_none());
        assert!(!store.stored.lock().unwrap().contains_key(&broken));
    }
}
