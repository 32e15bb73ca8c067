use axum::{Router, routing::get};
use storage::Database;

use super::handlers::get_athlete_score;

pub fn routes() -> Router<Database> {
    Router::new().route("/:athlete_id/score", get(get_athlete_score))
}
