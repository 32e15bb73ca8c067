use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{attach_analysis, create_post, list_own_posts};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/", post(create_post))
        .route("/me", get(list_own_posts))
        .route("/:post_id/analysis", put(attach_analysis))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
