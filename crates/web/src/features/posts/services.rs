use sqlx::PgPool;
use storage::{
    dto::post::{AttachAnalysisRequest, CreatePostRequest},
    error::Result,
    models::{PerformancePost, Role, ScoreRecord, Session},
    repository::{post::PostRepository, score::ScoreRepository},
    services::recompute,
};
use uuid::Uuid;

/// Create a clip for the calling athlete and refresh their cached score.
/// The post is returned even when the refresh fails.
pub async fn create_post(
    pool: &PgPool,
    session: &Session,
    request: &CreatePostRequest,
) -> Result<PerformancePost> {
    session.require_role(Role::Athlete)?;

    let post = PostRepository::new(pool)
        .create(session.user_id, request)
        .await?;
    recompute::refresh_after_write(&ScoreRepository::new(pool), session.user_id).await;

    Ok(post)
}

/// List the caller's own posts, newest first
pub async fn list_own_posts(pool: &PgPool, session: &Session) -> Result<Vec<PerformancePost>> {
    session.require_role(Role::Athlete)?;
    PostRepository::new(pool)
        .list_by_athlete(session.user_id)
        .await
}

/// Store analysis output on a post, then rescore its owner
pub async fn attach_analysis(
    pool: &PgPool,
    post_id: Uuid,
    request: &AttachAnalysisRequest,
) -> Result<(PerformancePost, ScoreRecord)> {
    let post = PostRepository::new(pool)
        .attach_analysis(post_id, request)
        .await?;
    let score = recompute::refresh_athlete(&ScoreRepository::new(pool), post.athlete_id).await?;

    Ok((post, score))
}
