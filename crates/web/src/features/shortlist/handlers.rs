use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::shortlist::{ShortlistRequest, ShortlistResponse},
    services::shortlist::{self, ShortlistCriteria},
};
use validator::Validate;

use crate::{error::WebError, middleware::session::Caller};

use super::services;

#[utoipa::path(
    post,
    path = "/api/recruit/shortlist",
    request_body = ShortlistRequest,
    responses(
        (status = 200, description = "Ranked shortlist for the report renderer", body = ShortlistResponse),
        (status = 400, description = "Invalid criteria"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only recruiters can generate shortlists")
    ),
    security(("bearer_auth" = [])),
    tag = "recruit"
)]
pub async fn generate_shortlist(
    State(db): State<Database>,
    Caller(session): Caller,
    Json(payload): Json<ShortlistRequest>,
) -> Result<Response, WebError> {
    shortlist::authorize(&session)?;
    payload.validate()?;

    let criteria = ShortlistCriteria::from_request(&payload).map_err(WebError::BadRequest)?;
    let candidates = services::generate_shortlist(db.pool(), &criteria).await?;

    Ok(Json(ShortlistResponse {
        generated_at: Utc::now().naive_utc(),
        recruiter_id: session.user_id,
        criteria: payload,
        candidates,
    })
    .into_response())
}
