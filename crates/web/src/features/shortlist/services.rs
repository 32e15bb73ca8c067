use sqlx::PgPool;
use storage::{
    dto::shortlist::ShortlistCandidate,
    error::Result,
    repository::user::UserRepository,
    services::shortlist::{self, ShortlistCriteria},
};

/// Rank the athlete pool against resolved criteria
pub async fn generate_shortlist(
    pool: &PgPool,
    criteria: &ShortlistCriteria,
) -> Result<Vec<ShortlistCandidate>> {
    let athletes = UserRepository::new(pool)
        .list_athletes(criteria.sport)
        .await?;

    let candidates = shortlist::rank(athletes, criteria);
    tracing::info!("Shortlist generated with {} candidates", candidates.len());

    Ok(candidates)
}
