use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        opportunity::{ApplyResponse, CreateOpportunityRequest, OpportunityWithApplicants},
    },
    models::Opportunity,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebError, middleware::session::Caller};

use super::services;

#[utoipa::path(
    get,
    path = "/api/opportunities",
    params(PaginationParams),
    responses(
        (status = 200, description = "Opportunities, newest first", body = PaginatedResponse<Opportunity>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "opportunities"
)]
pub async fn list_opportunities(
    State(db): State<Database>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (opportunities, total_items) = services::list_opportunities(db.pool(), &pagination).await?;

    let response = PaginatedResponse::new(
        opportunities,
        pagination.page,
        pagination.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/opportunities",
    request_body = CreateOpportunityRequest,
    responses(
        (status = 201, description = "Opportunity created", body = Opportunity),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only recruiters can post opportunities")
    ),
    security(("bearer_auth" = [])),
    tag = "opportunities"
)]
pub async fn create_opportunity(
    State(db): State<Database>,
    Caller(session): Caller,
    Json(payload): Json<CreateOpportunityRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let opportunity = services::create_opportunity(db.pool(), &session, &payload).await?;

    Ok((StatusCode::CREATED, Json(opportunity)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/opportunities/me",
    responses(
        (status = 200, description = "The caller's opportunities with applicants", body = Vec<OpportunityWithApplicants>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only recruiters own opportunities")
    ),
    security(("bearer_auth" = [])),
    tag = "opportunities"
)]
pub async fn list_own_opportunities(
    State(db): State<Database>,
    Caller(session): Caller,
) -> Result<Response, WebError> {
    let opportunities = services::list_own_opportunities(db.pool(), &session).await?;

    Ok(Json(opportunities).into_response())
}

#[utoipa::path(
    post,
    path = "/api/opportunities/{opportunity_id}/apply",
    params(
        ("opportunity_id" = Uuid, Path, description = "Opportunity identifier")
    ),
    responses(
        (status = 200, description = "Application recorded", body = ApplyResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only athletes can apply"),
        (status = 404, description = "Opportunity not found"),
        (status = 409, description = "Already applied")
    ),
    security(("bearer_auth" = [])),
    tag = "opportunities"
)]
pub async fn apply(
    State(db): State<Database>,
    Caller(session): Caller,
    Path(opportunity_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let opportunity = services::apply(db.pool(), &session, opportunity_id).await?;

    Ok(Json(ApplyResponse {
        message: "Application submitted".to_string(),
        opportunity,
    })
    .into_response())
}
