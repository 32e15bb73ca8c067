use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginationParams,
        opportunity::{CreateOpportunityRequest, OpportunityWithApplicants},
    },
    error::Result,
    models::{Opportunity, Role, Session},
    repository::opportunity::OpportunityRepository,
};
use uuid::Uuid;

/// Post a new opportunity on behalf of the calling recruiter
pub async fn create_opportunity(
    pool: &PgPool,
    session: &Session,
    request: &CreateOpportunityRequest,
) -> Result<Opportunity> {
    session.require_role(Role::Recruiter)?;
    OpportunityRepository::new(pool)
        .create(session.user_id, request)
        .await
}

pub async fn list_opportunities(
    pool: &PgPool,
    pagination: &PaginationParams,
) -> Result<(Vec<Opportunity>, i64)> {
    OpportunityRepository::new(pool)
        .list(pagination.limit(), pagination.offset())
        .await
}

/// Opportunities owned by the calling recruiter, with applicant details
pub async fn list_own_opportunities(
    pool: &PgPool,
    session: &Session,
) -> Result<Vec<OpportunityWithApplicants>> {
    session.require_role(Role::Recruiter)?;
    OpportunityRepository::new(pool)
        .list_by_recruiter(session.user_id)
        .await
}

pub async fn apply(pool: &PgPool, session: &Session, opportunity_id: Uuid) -> Result<Opportunity> {
    session.require_role(Role::Athlete)?;

    let opportunity = OpportunityRepository::new(pool)
        .apply(opportunity_id, session.user_id)
        .await?;
    tracing::info!("Athlete {} applied to {}", session.user_id, opportunity_id);

    Ok(opportunity)
}
