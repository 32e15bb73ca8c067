use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{Database, dto::score::AthleteScoreResponse};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/athletes/{athlete_id}/score",
    params(
        ("athlete_id" = Uuid, Path, description = "Athlete identifier")
    ),
    responses(
        (status = 200, description = "Live score computed from the athlete's posts", body = AthleteScoreResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn get_athlete_score(
    State(db): State<Database>,
    Path(athlete_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let score = services::get_live_score(db.pool(), athlete_id).await?;

    Ok(Json(score).into_response())
}
