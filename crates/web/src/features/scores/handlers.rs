use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{Database, models::ScoreRecord, services::recompute::BatchReport};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/scores/recompute",
    responses(
        (status = 200, description = "Batch recompute finished", body = BatchReport),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "scores"
)]
pub async fn recompute_all(State(db): State<Database>) -> Result<Response, WebError> {
    let report = services::recompute_all(db.pool()).await?;

    Ok(Json(report).into_response())
}

#[utoipa::path(
    post,
    path = "/api/scores/{athlete_id}/refresh",
    params(
        ("athlete_id" = Uuid, Path, description = "Athlete identifier")
    ),
    responses(
        (status = 200, description = "Athlete rescored and cached", body = ScoreRecord),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Athlete not found")
    ),
    security(("bearer_auth" = [])),
    tag = "scores"
)]
pub async fn refresh_athlete(
    State(db): State<Database>,
    Path(athlete_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let record = services::refresh_athlete(db.pool(), athlete_id).await?;

    Ok(Json(record).into_response())
}
