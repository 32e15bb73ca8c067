use async_trait::async_trait;
use sqlx::PgPool;

use super::opportunity::OpportunityRepository;
use super::post::PostRepository;
use crate::error::Result;
use crate::models::{AuthoredPost, Opportunity};
use crate::services::feed::FeedSource;

/// How many of the newest items each source contributes to the feed
pub const FEED_FETCH_LIMIT: usize = 500;

pub struct PgFeedSource<'a> {
    pool: &'a PgPool,
}

impl<'a> PgFeedSource<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedSource for PgFeedSource<'_> {
    async fn performance_posts(&self) -> Result<Vec<AuthoredPost>> {
        PostRepository::new(self.pool)
            .list_authored(FEED_FETCH_LIMIT as i64)
            .await
    }

    async fn opportunities(&self) -> Result<Vec<Opportunity>> {
        OpportunityRepository::new(self.pool)
            .list_recent(FEED_FETCH_LIMIT as i64)
            .await
    }
}
