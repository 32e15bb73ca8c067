use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{list_saved, toggle_saved};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/saved", get(list_saved))
        .route("/saved/:athlete_id", post(toggle_saved))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
