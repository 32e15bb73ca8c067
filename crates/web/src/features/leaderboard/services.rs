use sqlx::PgPool;
use storage::{
    dto::leaderboard::{LeaderboardEntry, LeaderboardQuery},
    error::Result,
    repository::user::UserRepository,
    services::leaderboard,
};

/// Rank athletes by their cached composite score
pub async fn get_leaderboard(pool: &PgPool, query: &LeaderboardQuery) -> Result<Vec<LeaderboardEntry>> {
    let athletes = UserRepository::new(pool)
        .list_athletes(query.sport_filter())
        .await?;

    Ok(leaderboard::rank(athletes, query))
}
