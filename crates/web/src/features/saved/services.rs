use sqlx::PgPool;
use storage::{
    error::Result,
    models::{RankedAthlete, Role, Session},
    repository::saved::SavedRepository,
    services::saved::{Membership, SavedSet},
};
use uuid::Uuid;

/// Flip an athlete's membership in the caller's saved set
pub async fn toggle_saved(
    pool: &PgPool,
    session: &Session,
    athlete_id: Uuid,
) -> Result<(Membership, SavedSet)> {
    session.require_role(Role::Recruiter)?;
    SavedRepository::new(pool)
        .toggle(session.user_id, athlete_id)
        .await
}

pub async fn list_saved(pool: &PgPool, session: &Session) -> Result<Vec<RankedAthlete>> {
    session.require_role(Role::Recruiter)?;
    SavedRepository::new(pool).list(session.user_id).await
}
