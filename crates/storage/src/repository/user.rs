use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Profile, RankedAthlete, Role, ScoreSnapshot, Sport};
use crate::services::scoring;

pub(crate) const PROFILE_COLUMNS: &str = r#"
    u.user_id, u.name, u.email, u.phone_number, u.role, u.sport, u.player_role,
    u.location, u.age, u.organization, u.bio, u.created_at,
    u.sport_index, u.composite_score, u.scored_at
"#;

#[derive(Debug, FromRow)]
pub(crate) struct ProfileRow {
    user_id: Uuid,
    name: String,
    email: String,
    phone_number: String,
    role: String,
    sport: Option<String>,
    player_role: Option<String>,
    location: String,
    age: Option<i32>,
    organization: Option<String>,
    bio: Option<String>,
    created_at: NaiveDateTime,
    sport_index: i32,
    composite_score: i32,
    scored_at: Option<NaiveDateTime>,
}

impl ProfileRow {
    pub(crate) fn into_ranked(self) -> Result<RankedAthlete> {
        let sport = self.sport.as_deref().map(str::parse::<Sport>).transpose()?;

        Ok(RankedAthlete {
            profile: Profile {
                user_id: self.user_id,
                name: self.name,
                email: self.email,
                phone_number: self.phone_number,
                role: self.role.parse::<Role>()?,
                sport,
                player_role: self.player_role,
                location: self.location,
                age: self.age,
                organization: self.organization,
                bio: self.bio,
                created_at: self.created_at,
            },
            score: cached_score(self.sport_index, self.composite_score, self.scored_at),
        })
    }
}

fn score_from_column(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

/// Reads the cached score columns. Rows that were never scored report the
/// aggregator's baseline rather than the raw column defaults.
pub(crate) fn cached_score(
    sport_index: i32,
    composite_score: i32,
    scored_at: Option<NaiveDateTime>,
) -> ScoreSnapshot {
    match scored_at {
        Some(_) => ScoreSnapshot {
            sport_index: score_from_column(sport_index),
            composite_score: score_from_column(composite_score),
        },
        None => scoring::baseline().snapshot(),
    }
}

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find any user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<RankedAthlete> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM users u WHERE u.user_id = $1");

        let row: ProfileRow = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        row.into_ranked()
    }

    /// Find a user that exists and is an athlete
    pub async fn find_athlete(&self, id: Uuid) -> Result<RankedAthlete> {
        let athlete = self.find_by_id(id).await?;

        if athlete.profile.is_athlete() {
            Ok(athlete)
        } else {
            Err(StorageError::NotFound)
        }
    }

    /// List athletes with their cached scores, oldest account first
    pub async fn list_athletes(&self, sport: Option<Sport>) -> Result<Vec<RankedAthlete>> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {PROFILE_COLUMNS} FROM users u WHERE u.role = 'athlete'"
        ));

        if let Some(sport) = sport {
            query.push(" AND u.sport = ");
            query.push_bind(sport.as_str());
        }

        query.push(" ORDER BY u.created_at, u.user_id");

        let rows: Vec<ProfileRow> = query.build_query_as().fetch_all(self.pool).await?;

        rows.into_iter().map(ProfileRow::into_ranked).collect()
    }
}
