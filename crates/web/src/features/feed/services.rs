use sqlx::PgPool;
use storage::{
    repository::feed::PgFeedSource,
    services::feed::{self, DiscoveryFeed, FeedError},
};

/// Fetch both feed sources concurrently and merge them
pub async fn load_feed(pool: &PgPool) -> Result<DiscoveryFeed, FeedError> {
    let source = PgFeedSource::new(pool);
    feed::load_feed(&source).await
}
