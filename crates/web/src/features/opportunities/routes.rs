use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{apply, create_opportunity, list_opportunities, list_own_opportunities};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_opportunity))
        .route("/me", get(list_own_opportunities))
        .route("/:opportunity_id/apply", post(apply))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_opportunities))
        .merge(protected)
}
