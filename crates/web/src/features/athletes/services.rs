use sqlx::PgPool;
use storage::{
    dto::score::AthleteScoreResponse,
    error::Result,
    repository::{post::PostRepository, user::UserRepository},
    services::{scoring, tier},
};
use uuid::Uuid;

/// Compute an athlete's score from their current posts without touching the cache
pub async fn get_live_score(pool: &PgPool, athlete_id: Uuid) -> Result<AthleteScoreResponse> {
    let athlete = UserRepository::new(pool).find_athlete(athlete_id).await?;
    let posts = PostRepository::new(pool).list_by_athlete(athlete_id).await?;

    let record = scoring::score_posts(&posts);
    let severity = tier::severity(record.composite_score);

    Ok(AthleteScoreResponse {
        athlete_id,
        name: athlete.profile.name,
        record,
        severity,
    })
}
