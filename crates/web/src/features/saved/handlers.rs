use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::saved::{SavedAthleteResponse, ToggleSavedResponse},
};
use uuid::Uuid;

use crate::{error::WebError, middleware::session::Caller};

use super::services;

#[utoipa::path(
    post,
    path = "/api/recruiters/saved/{athlete_id}",
    params(
        ("athlete_id" = Uuid, Path, description = "Athlete to save or unsave")
    ),
    responses(
        (status = 200, description = "Membership toggled", body = ToggleSavedResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only recruiters keep saved athletes"),
        (status = 404, description = "Athlete not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recruit"
)]
pub async fn toggle_saved(
    State(db): State<Database>,
    Caller(session): Caller,
    Path(athlete_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let (membership, saved) = services::toggle_saved(db.pool(), &session, athlete_id).await?;

    Ok(Json(ToggleSavedResponse {
        athlete_id,
        membership,
        saved_athletes: saved.into_vec(),
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/recruiters/saved",
    responses(
        (status = 200, description = "The caller's saved athletes", body = Vec<SavedAthleteResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only recruiters keep saved athletes")
    ),
    security(("bearer_auth" = [])),
    tag = "recruit"
)]
pub async fn list_saved(
    State(db): State<Database>,
    Caller(session): Caller,
) -> Result<Response, WebError> {
    let athletes = services::list_saved(db.pool(), &session).await?;

    let response: Vec<SavedAthleteResponse> = athletes
        .into_iter()
        .map(SavedAthleteResponse::from)
        .collect();

    Ok(Json(response).into_response())
}
