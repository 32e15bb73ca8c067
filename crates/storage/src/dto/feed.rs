use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common::{normalize_choice, parse_sport_filter};
use crate::services::feed::{FeedFilter, FeedItem, FeedOrder};

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedSort {
    #[default]
    Newest,
    CompositeScore,
    SportIndex,
}

impl From<FeedSort> for FeedOrder {
    fn from(sort: FeedSort) -> Self {
        match sort {
            FeedSort::Newest => FeedOrder::Newest,
            FeedSort::CompositeScore => FeedOrder::CompositeScore,
            FeedSort::SportIndex => FeedOrder::SportIndex,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct FeedQuery {
    /// Sport name, or "All"
    pub sport: Option<String>,
    /// Region label such as "Maharashtra" or "All Regions"
    pub region: Option<String>,
    pub player_role: Option<String>,
    /// Free text matched against name, location, role and sport
    pub q: Option<String>,
    pub min_composite_score: Option<u32>,
    pub min_sport_index: Option<u32>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    #[serde(default)]
    pub sort: FeedSort,
}

impl FeedQuery {
    pub fn to_filter(&self) -> Result<FeedFilter, String> {
        if let (Some(min), Some(max)) = (self.min_age, self.max_age)
            && min > max
        {
            return Err("min_age must not exceed max_age".to_string());
        }

        Ok(FeedFilter {
            sport: parse_sport_filter(self.sport.as_deref())?,
            region: self.region.clone(),
            player_role: normalize_choice(self.player_role.as_deref()),
            search: self.q.clone(),
            min_composite_score: self.min_composite_score,
            min_sport_index: self.min_sport_index,
            min_age: self.min_age,
            max_age: self.max_age,
        })
    }
}

/// Each category contributes at most its newest `FEED_FETCH_LIMIT` items.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedResponse {
    pub total_fetched: usize,
    /// Set when a category hit the fetch window and older items were left out
    pub truncated: bool,
    pub items: Vec<FeedItem>,
}
