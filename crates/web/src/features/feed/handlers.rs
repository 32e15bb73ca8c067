use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::feed::{FeedQuery, FeedResponse},
    repository::feed::FEED_FETCH_LIMIT,
};

use crate::{error::WebError, middleware::session::Caller};

use super::services;

#[utoipa::path(
    get,
    path = "/api/feed",
    params(FeedQuery),
    responses(
        (status = 200, description = "Merged discovery feed", body = FeedResponse),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Missing session or the session was rejected by the data source"),
        (status = 503, description = "A feed source is temporarily unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "feed"
)]
pub async fn get_feed(
    State(db): State<Database>,
    Caller(session): Caller,
    Query(query): Query<FeedQuery>,
) -> Result<Response, WebError> {
    let filter = query.to_filter().map_err(WebError::BadRequest)?;

    let feed = services::load_feed(db.pool()).await?;
    let items = feed
        .view(&filter, query.sort.into())
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();

    tracing::debug!(
        "Feed for {} returned {} of {} items",
        session.user_id,
        items.len(),
        feed.len()
    );

    Ok(Json(FeedResponse {
        total_fetched: feed.len(),
        truncated: feed.reached_limit(FEED_FETCH_LIMIT),
        items,
    })
    .into_response())
}
