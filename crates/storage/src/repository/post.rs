use chrono::NaiveDateTime;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::user::{PROFILE_COLUMNS, ProfileRow};
use crate::dto::post::{AttachAnalysisRequest, CreatePostRequest};
use crate::error::{Result, StorageError};
use crate::models::{AuthoredPost, PerformancePost, RawMetrics};

#[derive(Debug, FromRow)]
struct PostRow {
    post_id: Uuid,
    athlete_id: Uuid,
    created_at: NaiveDateTime,
    metrics: Json<RawMetrics>,
    summary: Option<String>,
    media_ref: Option<String>,
}

impl From<PostRow> for PerformancePost {
    fn from(row: PostRow) -> Self {
        Self {
            post_id: row.post_id,
            athlete_id: row.athlete_id,
            created_at: row.created_at,
            metrics: row.metrics.0,
            summary: row.summary,
            media_ref: row.media_ref,
        }
    }
}

#[derive(Debug, FromRow)]
struct AuthoredRow {
    post_id: Uuid,
    athlete_id: Uuid,
    post_created_at: NaiveDateTime,
    metrics: Json<RawMetrics>,
    summary: Option<String>,
    media_ref: Option<String>,
    #[sqlx(flatten)]
    author: ProfileRow,
}

pub struct PostRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a post with no metrics yet
    pub async fn create(&self, athlete_id: Uuid, request: &CreatePostRequest) -> Result<PerformancePost> {
        let row: PostRow = sqlx::query_as(
            r#"
            INSERT INTO performance_posts (post_id, athlete_id, media_ref)
            VALUES ($1, $2, $3)
            RETURNING post_id, athlete_id, created_at, metrics, summary, media_ref
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(athlete_id)
        .bind(&request.media_ref)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// All posts of an athlete, newest first
    pub async fn list_by_athlete(&self, athlete_id: Uuid) -> Result<Vec<PerformancePost>> {
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT post_id, athlete_id, created_at, metrics, summary, media_ref
            FROM performance_posts
            WHERE athlete_id = $1
            ORDER BY created_at DESC, post_id
            "#,
        )
        .bind(athlete_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(PerformancePost::from).collect())
    }

    /// Replace a post's metrics and summary
    pub async fn attach_analysis(
        &self,
        post_id: Uuid,
        request: &AttachAnalysisRequest,
    ) -> Result<PerformancePost> {
        let row: PostRow = sqlx::query_as(
            r#"
            UPDATE performance_posts
            SET metrics = $2, summary = $3
            WHERE post_id = $1
            RETURNING post_id, athlete_id, created_at, metrics, summary, media_ref
            "#,
        )
        .bind(post_id)
        .bind(Json(&request.metrics))
        .bind(&request.summary)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    /// Newest posts joined with their authors, for the discovery feed
    pub async fn list_authored(&self, limit: i64) -> Result<Vec<AuthoredPost>> {
        let sql = format!(
            r#"
            SELECT p.post_id, p.athlete_id, p.created_at AS post_created_at, p.metrics,
                   p.summary, p.media_ref, {PROFILE_COLUMNS}
            FROM performance_posts p
            INNER JOIN users u ON u.user_id = p.athlete_id
            ORDER BY p.created_at DESC, p.post_id
            LIMIT $1
            "#
        );

        let rows: Vec<AuthoredRow> = sqlx::query_as(&sql).bind(limit).fetch_all(self.pool).await?;

        rows.into_iter()
            .map(|row| {
                let author = row.author.into_ranked()?;
                Ok(AuthoredPost {
                    post: PerformancePost {
                        post_id: row.post_id,
                        athlete_id: row.athlete_id,
                        created_at: row.post_created_at,
                        metrics: row.metrics.0,
                        summary: row.summary,
                        media_ref: row.media_ref,
                    },
                    author: author.profile,
                    score: author.score,
                })
            })
            .collect()
    }
}
