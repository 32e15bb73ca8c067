use axum::{Router, middleware, routing::post};
use storage::Database;

use super::handlers::{recompute_all, refresh_athlete};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/recompute", post(recompute_all))
        .route("/:athlete_id/refresh", post(refresh_athlete))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
