use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::user::{PROFILE_COLUMNS, ProfileRow};
use crate::error::{Result, StorageError};
use crate::models::{RankedAthlete, Role};
use crate::services::saved::{self, Membership, SavedSet};

#[derive(Debug, FromRow)]
struct TargetRow {
    role: String,
}

pub struct SavedRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SavedRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Flip membership of `athlete_id` in the recruiter's saved set.
    ///
    /// The recruiter row is locked for the duration so concurrent toggles
    /// for the same recruiter apply one after the other.
    pub async fn toggle(&self, recruiter_id: Uuid, athlete_id: Uuid) -> Result<(Membership, SavedSet)> {
        let mut tx = self.pool.begin().await?;

        let target: Option<TargetRow> = sqlx::query_as("SELECT role FROM users WHERE user_id = $1")
            .bind(athlete_id)
            .fetch_optional(&mut *tx)
            .await?;
        let target_role = target.map(|row| row.role.parse::<Role>()).transpose()?;
        saved::check_target(target_role)?;

        sqlx::query("SELECT user_id FROM users WHERE user_id = $1 FOR UPDATE")
            .bind(recruiter_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StorageError::NotFound)?;

        let current: Vec<Uuid> = sqlx::query_scalar(
            "SELECT athlete_id FROM saved_athletes WHERE recruiter_id = $1 ORDER BY seq",
        )
        .bind(recruiter_id)
        .fetch_all(&mut *tx)
        .await?;

        let mut saved = SavedSet::new(current);
        let membership = saved.toggle(athlete_id);

        match membership {
            Membership::Saved => {
                sqlx::query("INSERT INTO saved_athletes (recruiter_id, athlete_id) VALUES ($1, $2)")
                    .bind(recruiter_id)
                    .bind(athlete_id)
                    .execute(&mut *tx)
                    .await?;
            }
            Membership::Removed => {
                sqlx::query("DELETE FROM saved_athletes WHERE recruiter_id = $1 AND athlete_id = $2")
                    .bind(recruiter_id)
                    .bind(athlete_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        Ok((membership, saved))
    }

    /// Saved athletes with their cached scores, in the order they were saved
    pub async fn list(&self, recruiter_id: Uuid) -> Result<Vec<RankedAthlete>> {
        let sql = format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM saved_athletes s
            INNER JOIN users u ON u.user_id = s.athlete_id
            WHERE s.recruiter_id = $1
            ORDER BY s.seq
            "#
        );

        let rows: Vec<ProfileRow> = sqlx::query_as(&sql)
            .bind(recruiter_id)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(ProfileRow::into_ranked).collect()
    }
}
