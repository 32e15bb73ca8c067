use std::collections::HashMap;

use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::user::cached_score;
use crate::dto::opportunity::{ApplicantSummary, CreateOpportunityRequest, OpportunityWithApplicants};
use crate::error::{Result, StorageError};
use crate::models::{Opportunity, Sport};

const OPPORTUNITY_SELECT: &str = r#"
    SELECT o.opportunity_id, o.recruiter_id, u.name AS recruiter_name, u.organization,
           o.title, o.sport, o.role, o.location, o.date, o.description, o.created_at,
           ARRAY(
               SELECT oa.athlete_id FROM opportunity_applicants oa
               WHERE oa.opportunity_id = o.opportunity_id
               ORDER BY oa.seq
           ) AS applicants
    FROM opportunities o
    INNER JOIN users u ON u.user_id = o.recruiter_id
"#;

#[derive(Debug, FromRow)]
struct OpportunityRow {
    opportunity_id: Uuid,
    recruiter_id: Uuid,
    recruiter_name: String,
    organization: Option<String>,
    title: String,
    sport: String,
    role: String,
    location: String,
    date: String,
    description: String,
    created_at: NaiveDateTime,
    applicants: Vec<Uuid>,
}

impl OpportunityRow {
    fn into_model(self) -> Result<Opportunity> {
        Ok(Opportunity {
            opportunity_id: self.opportunity_id,
            recruiter_id: self.recruiter_id,
            recruiter_name: self.recruiter_name,
            organization: self.organization,
            title: self.title,
            sport: self.sport.parse::<Sport>()?,
            role: self.role,
            location: self.location,
            date: self.date,
            description: self.description,
            created_at: self.created_at,
            applicants: self.applicants,
        })
    }
}

#[derive(Debug, FromRow)]
struct ApplicantRow {
    opportunity_id: Uuid,
    athlete_id: Uuid,
    name: String,
    email: String,
    location: String,
    sport: Option<String>,
    player_role: Option<String>,
    sport_index: i32,
    composite_score: i32,
    scored_at: Option<NaiveDateTime>,
    applied_at: NaiveDateTime,
}

pub struct OpportunityRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OpportunityRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        recruiter_id: Uuid,
        request: &CreateOpportunityRequest,
    ) -> Result<Opportunity> {
        let opportunity_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO opportunities
                (opportunity_id, recruiter_id, title, sport, role, location, date, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(opportunity_id)
        .bind(recruiter_id)
        .bind(&request.title)
        .bind(request.sport.as_str())
        .bind(&request.role)
        .bind(&request.location)
        .bind(&request.date)
        .bind(&request.description)
        .execute(self.pool)
        .await?;

        self.find_by_id(opportunity_id).await
    }

    pub async fn find_by_id(&self, opportunity_id: Uuid) -> Result<Opportunity> {
        let sql = format!("{OPPORTUNITY_SELECT} WHERE o.opportunity_id = $1");

        let row: OpportunityRow = sqlx::query_as(&sql)
            .bind(opportunity_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        row.into_model()
    }

    /// Public listing, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<(Vec<Opportunity>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM opportunities")
            .fetch_one(self.pool)
            .await?;

        let sql = format!(
            "{OPPORTUNITY_SELECT} ORDER BY o.created_at DESC, o.opportunity_id LIMIT $1 OFFSET $2"
        );
        let rows: Vec<OpportunityRow> = sqlx::query_as(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        let opportunities = rows
            .into_iter()
            .map(OpportunityRow::into_model)
            .collect::<Result<Vec<_>>>()?;

        Ok((opportunities, total))
    }

    /// Newest opportunities for the discovery feed
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Opportunity>> {
        let (opportunities, _) = self.list(limit, 0).await?;
        Ok(opportunities)
    }

    /// Opportunities posted by one recruiter, each with its applicants' details
    pub async fn list_by_recruiter(&self, recruiter_id: Uuid) -> Result<Vec<OpportunityWithApplicants>> {
        let sql = format!(
            "{OPPORTUNITY_SELECT} WHERE o.recruiter_id = $1 ORDER BY o.created_at DESC, o.opportunity_id"
        );
        let rows: Vec<OpportunityRow> = sqlx::query_as(&sql)
            .bind(recruiter_id)
            .fetch_all(self.pool)
            .await?;

        let opportunities = rows
            .into_iter()
            .map(OpportunityRow::into_model)
            .collect::<Result<Vec<_>>>()?;

        let ids: Vec<Uuid> = opportunities.iter().map(|o| o.opportunity_id).collect();
        let applicant_rows: Vec<ApplicantRow> = sqlx::query_as(
            r#"
            SELECT oa.opportunity_id, u.user_id AS athlete_id, u.name, u.email, u.location,
                   u.sport, u.player_role, u.sport_index, u.composite_score, u.scored_at,
                   oa.applied_at
            FROM opportunity_applicants oa
            INNER JOIN users u ON u.user_id = oa.athlete_id
            WHERE oa.opportunity_id = ANY($1)
            ORDER BY oa.seq
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut by_opportunity: HashMap<Uuid, Vec<ApplicantSummary>> = HashMap::new();
        for row in applicant_rows {
            let sport = row.sport.as_deref().map(str::parse::<Sport>).transpose()?;
            let score = cached_score(row.sport_index, row.composite_score, row.scored_at);
            by_opportunity
                .entry(row.opportunity_id)
                .or_default()
                .push(ApplicantSummary {
                    athlete_id: row.athlete_id,
                    name: row.name,
                    email: row.email,
                    location: row.location,
                    sport,
                    player_role: row.player_role,
                    sport_index: score.sport_index,
                    composite_score: score.composite_score,
                    applied_at: row.applied_at,
                });
        }

        Ok(opportunities
            .into_iter()
            .map(|opportunity| OpportunityWithApplicants {
                applicant_details: by_opportunity
                    .remove(&opportunity.opportunity_id)
                    .unwrap_or_default(),
                opportunity,
            })
            .collect())
    }

    /// Register an athlete as applicant. Applying twice is a constraint violation.
    pub async fn apply(&self, opportunity_id: Uuid, athlete_id: Uuid) -> Result<Opportunity> {
        self.find_by_id(opportunity_id).await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO opportunity_applicants (opportunity_id, athlete_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(opportunity_id)
        .bind(athlete_id)
        .execute(self.pool)
        .await
        .map_err(StorageError::from);

        match inserted {
            Ok(_) => self.find_by_id(opportunity_id).await,
            Err(e) if e.is_unique_violation() => Err(StorageError::ConstraintViolation(
                "You have already applied for this opportunity".to_string(),
            )),
            Err(e) => Err(e),
        }
    }
}
