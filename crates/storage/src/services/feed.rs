//! Discovery feed: performance posts and recruiter opportunities merged into
//! one newest-first sequence that can be filtered and re-sorted in memory.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ingestion;
use super::narrative::{self, Narrative, NarrativeContext};
use super::tier;
use crate::error::{Result, StorageError};
use crate::models::{AuthoredPost, Opportunity, Severity, Sport, Tier};

/// Region value that disables region filtering
pub const ALL_REGIONS: &str = "All Regions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedSourceKind {
    Posts,
    Opportunities,
}

impl fmt::Display for FeedSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posts => f.write_str("posts"),
            Self::Opportunities => f.write_str("opportunities"),
        }
    }
}

/// A source failure. The feed is never returned with a whole category missing.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{origin} source rejected the caller's credentials")]
    Unauthorized { origin: FeedSourceKind },

    #[error("{origin} source unavailable: {message}")]
    Unavailable {
        origin: FeedSourceKind,
        message: String,
    },
}

impl FeedError {
    fn from_source(origin: FeedSourceKind, error: StorageError) -> Self {
        tracing::warn!(%origin, error = %error, "feed source failed");

        if error.is_auth_failure() {
            Self::Unauthorized { origin }
        } else {
            Self::Unavailable {
                origin,
                message: error.to_string(),
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// The two collaborators the feed is assembled from.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn performance_posts(&self) -> Result<Vec<AuthoredPost>>;

    async fn opportunities(&self) -> Result<Vec<Opportunity>>;
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PerformanceItem {
    pub post_id: Uuid,
    pub athlete_id: Uuid,
    pub created_at: NaiveDateTime,
    pub athlete_name: String,
    pub sport: Option<Sport>,
    pub player_role: Option<String>,
    pub location: String,
    pub age: Option<i32>,
    pub sport_index: u32,
    pub composite_score: u32,
    pub tier: Tier,
    pub severity: Severity,
    pub metrics: BTreeMap<String, f64>,
    pub traits: BTreeMap<String, String>,
    pub summary: Option<String>,
    pub media_ref: Option<String>,
    pub narrative: Narrative,
}

impl PerformanceItem {
    pub fn from_authored(authored: AuthoredPost) -> Self {
        let AuthoredPost {
            post,
            author,
            score,
        } = authored;
        let partition = ingestion::partition(&post.metrics);

        let narrative = narrative::select(&NarrativeContext {
            composite_score: Some(score.composite_score),
            sport: author.sport,
            top_metric: partition.top_metric(),
            player_role: author.player_role.as_deref(),
            summary: post.summary.as_deref(),
            quantitative_count: partition.quantitative.len(),
        });

        Self {
            post_id: post.post_id,
            athlete_id: post.athlete_id,
            created_at: post.created_at,
            athlete_name: author.name,
            sport: author.sport,
            player_role: author.player_role,
            location: author.location,
            age: author.age,
            sport_index: score.sport_index,
            composite_score: score.composite_score,
            tier: tier::classify(Some(score.composite_score)),
            severity: tier::severity(score.composite_score),
            metrics: partition.quantitative,
            traits: partition.qualitative,
            summary: post.summary,
            media_ref: post.media_ref,
            narrative,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedItem {
    Performance(PerformanceItem),
    Opportunity(Opportunity),
}

impl FeedItem {
    pub fn created_at(&self) -> NaiveDateTime {
        match self {
            Self::Performance(item) => item.created_at,
            Self::Opportunity(opportunity) => opportunity.created_at,
        }
    }

    fn composite_score(&self) -> Option<u32> {
        match self {
            Self::Performance(item) => Some(item.composite_score),
            Self::Opportunity(_) => None,
        }
    }

    fn sport_index(&self) -> Option<u32> {
        match self {
            Self::Performance(item) => Some(item.sport_index),
            Self::Opportunity(_) => None,
        }
    }

    /// Score and age thresholds describe athletes, so opportunities are exempt from them.
    pub fn matches(&self, filter: &FeedFilter) -> bool {
        match self {
            Self::Performance(item) => {
                filter.sport.is_none_or(|sport| item.sport == Some(sport))
                    && filter.region_allows(&item.location)
                    && filter.role_allows(item.player_role.as_deref())
                    && filter.search_allows(&[
                        Some(item.athlete_name.as_str()),
                        Some(item.location.as_str()),
                        item.player_role.as_deref(),
                        item.sport.map(|s| s.as_str()),
                    ])
                    && filter
                        .min_composite_score
                        .is_none_or(|min| item.composite_score >= min)
                    && filter
                        .min_sport_index
                        .is_none_or(|min| item.sport_index >= min)
                    && filter.age_allows(item.age)
            }
            Self::Opportunity(opportunity) => {
                filter.sport.is_none_or(|sport| opportunity.sport == sport)
                    && filter.region_allows(&opportunity.location)
                    && filter.role_allows(Some(opportunity.role.as_str()))
                    && filter.search_allows(&[
                        Some(opportunity.title.as_str()),
                        Some(opportunity.location.as_str()),
                        Some(opportunity.role.as_str()),
                        Some(opportunity.sport.as_str()),
                    ])
            }
        }
    }
}

/// Conjunction of optional predicates over feed items.
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    pub sport: Option<Sport>,
    pub region: Option<String>,
    pub player_role: Option<String>,
    pub search: Option<String>,
    pub min_composite_score: Option<u32>,
    pub min_sport_index: Option<u32>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
}

impl FeedFilter {
    fn region_allows(&self, location: &str) -> bool {
        self.region
            .as_deref()
            .is_none_or(|region| region_matches(location, region))
    }

    fn role_allows(&self, role: Option<&str>) -> bool {
        self.player_role
            .as_deref()
            .is_none_or(|wanted| role.is_some_and(|r| r.eq_ignore_ascii_case(wanted)))
    }

    fn search_allows(&self, fields: &[Option<&str>]) -> bool {
        let Some(query) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        let query = query.to_lowercase();

        fields
            .iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&query))
    }

    fn age_allows(&self, age: Option<i32>) -> bool {
        if self.min_age.is_none() && self.max_age.is_none() {
            return true;
        }
        let Some(age) = age.and_then(|a| u32::try_from(a).ok()) else {
            return false;
        };

        self.min_age.is_none_or(|min| age >= min) && self.max_age.is_none_or(|max| age <= max)
    }
}

/// Approximate location match: the location must contain the region's first
/// word, case-insensitively. [`ALL_REGIONS`] and blank regions match everything.
pub fn region_matches(location: &str, region: &str) -> bool {
    if region.trim().is_empty() || region.trim().eq_ignore_ascii_case(ALL_REGIONS) {
        return true;
    }

    match region.split_whitespace().next() {
        Some(token) => location.to_lowercase().contains(&token.to_lowercase()),
        None => true,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedOrder {
    #[default]
    Newest,
    CompositeScore,
    SportIndex,
}

/// A fetched feed. Filtering and sorting never go back to the sources.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryFeed {
    items: Vec<FeedItem>,
}

impl DiscoveryFeed {
    /// Merges both categories newest first. Equal timestamps keep posts before
    /// opportunities and each source's own order.
    pub fn compose(posts: Vec<AuthoredPost>, opportunities: Vec<Opportunity>) -> Self {
        let mut items: Vec<FeedItem> = posts
            .into_iter()
            .map(|p| FeedItem::Performance(PerformanceItem::from_authored(p)))
            .chain(opportunities.into_iter().map(FeedItem::Opportunity))
            .collect();

        items.sort_by_key(|item| Reverse(item.created_at()));

        Self { items }
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when either category filled its fetch window, meaning older
    /// items of that category were left out.
    pub fn reached_limit(&self, per_source: usize) -> bool {
        let posts = self
            .items
            .iter()
            .filter(|item| matches!(item, FeedItem::Performance(_)))
            .count();
        let opportunities = self.items.len() - posts;
        posts >= per_source || opportunities >= per_source
    }

    pub fn filter(&self, filter: &FeedFilter) -> Vec<&FeedItem> {
        self.items.iter().filter(|item| item.matches(filter)).collect()
    }

    /// Filters then orders. Score orders put items without a score last.
    pub fn view(&self, filter: &FeedFilter, order: FeedOrder) -> Vec<&FeedItem> {
        let mut items = self.filter(filter);

        match order {
            FeedOrder::Newest => {}
            FeedOrder::CompositeScore => items.sort_by_key(|item| Reverse(item.composite_score())),
            FeedOrder::SportIndex => items.sort_by_key(|item| Reverse(item.sport_index())),
        }

        items
    }
}

/// Queries both sources concurrently and merges them.
pub async fn load_feed<S>(source: &S) -> std::result::Result<DiscoveryFeed, FeedError>
where
    S: FeedSource + ?Sized,
{
    let (posts, opportunities) =
        futures::join!(source.performance_posts(), source.opportunities());

    match (posts, opportunities) {
        (Ok(posts), Ok(opportunities)) => {
            tracing::debug!(
                posts = posts.len(),
                opportunities = opportunities.len(),
                "composing discovery feed"
            );
            Ok(DiscoveryFeed::compose(posts, opportunities))
        }
        (Err(e), Ok(_)) => Err(FeedError::from_source(FeedSourceKind::Posts, e)),
        (Ok(_), Err(e)) => Err(FeedError::from_source(FeedSourceKind::Opportunities, e)),
        (Err(posts_err), Err(opps_err)) => {
            let posts_err = FeedError::from_source(FeedSourceKind::Posts, posts_err);
            let opps_err = FeedError::from_source(FeedSourceKind::Opportunities, opps_err);
            // auth problems take precedence so the consumer asks for a new login
            if opps_err.is_unauthorized() && !posts_err.is_unauthorized() {
                Err(opps_err)
            } else {
                Err(posts_err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PerformancePost, Profile, Role, ScoreSnapshot};
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn athlete(name: &str, sport: Sport, role: &str, location: &str, age: i32) -> Profile {
        Profile {
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone_number: "+91 90000 00000".to_string(),
            role: Role::Athlete,
            sport: Some(sport),
            player_role: Some(role.to_string()),
            location: location.to_string(),
            age: Some(age),
            organization: None,
            bio: None,
            created_at: at(0),
        }
    }

    fn authored(author: Profile, hour: u32, composite: u32, sport_index: u32) -> AuthoredPost {
        AuthoredPost {
            post: PerformancePost {
                post_id: Uuid::new_v4(),
                athlete_id: author.user_id,
                created_at: at(hour),
                metrics: json!({"bat_speed": 8.0, "stance": "open"})
                    .as_object()
                    .cloned()
                    .unwrap(),
                summary: None,
                media_ref: None,
            },
            author,
            score: ScoreSnapshot {
                sport_index,
                composite_score: composite,
            },
        }
    }

    fn opportunity(title: &str, sport: Sport, location: &str, hour: u32) -> Opportunity {
        Opportunity {
            opportunity_id: Uuid::new_v4(),
            recruiter_id: Uuid::new_v4(),
            recruiter_name: "Scout".to_string(),
            organization: Some("Academy".to_string()),
            title: title.to_string(),
            sport,
            role: "Bowler".to_string(),
            location: location.to_string(),
            date: "To be announced".to_string(),
            description: "Open trials".to_string(),
            created_at: at(hour),
            applicants: Vec::new(),
        }
    }

    fn sample_feed() -> DiscoveryFeed {
        DiscoveryFeed::compose(
            vec![
                authored(
                    athlete("Asha", Sport::Cricket, "Batsman", "Mumbai, Maharashtra", 17),
                    3,
                    720,
                    880,
                ),
                authored(
                    athlete("Ravi", Sport::Football, "Forward", "Kochi, Kerala", 21),
                    5,
                    410,
                    320,
                ),
            ],
            vec![opportunity("U19 trials", Sport::Cricket, "Pune, Maharashtra", 4)],
        )
    }

    #[test]
    fn test_reached_limit_per_category() {
        let feed = sample_feed();
        assert!(!feed.reached_limit(3));
        assert!(feed.reached_limit(2));
        assert!(feed.reached_limit(1));

        let opportunities_only = DiscoveryFeed::compose(
            Vec::new(),
            vec![opportunity("Trials", Sport::Cricket, "Mumbai", 2)],
        );
        assert!(opportunities_only.reached_limit(1));
        assert!(!DiscoveryFeed::default().reached_limit(1));
    }

    #[test]
    fn test_opportunity_newer_than_post_comes_first() {
        let feed = DiscoveryFeed::compose(
            vec![authored(
                athlete("Asha", Sport::Cricket, "Batsman", "Mumbai", 17),
                1,
                500,
                500,
            )],
            vec![opportunity("Trials", Sport::Cricket, "Mumbai", 2)],
        );

        assert!(matches!(feed.items()[0], FeedItem::Opportunity(_)));
        assert!(matches!(feed.items()[1], FeedItem::Performance(_)));
    }

    #[test]
    fn test_merge_is_newest_first_and_stable() {
        let feed = sample_feed();
        let hours: Vec<NaiveDateTime> = feed.items().iter().map(FeedItem::created_at).collect();
        assert_eq!(hours, vec![at(5), at(4), at(3)]);

        let tie = DiscoveryFeed::compose(
            vec![authored(
                athlete("Asha", Sport::Cricket, "Batsman", "Mumbai", 17),
                2,
                500,
                500,
            )],
            vec![opportunity("Trials", Sport::Cricket, "Mumbai", 2)],
        );
        for _ in 0..3 {
            assert!(matches!(tie.items()[0], FeedItem::Performance(_)));
        }
    }

    #[test]
    fn test_region_heuristic() {
        assert!(region_matches("Mumbai, Maharashtra", "Maharashtra"));
        assert!(region_matches("Mumbai, Maharashtra", ALL_REGIONS));
        assert!(!region_matches("Mumbai, Maharashtra", "Kerala"));
        assert!(region_matches("Chennai, Tamil Nadu", "Tamil Nadu"));
        assert!(region_matches("anywhere", "  "));
        // only the first token is compared
        assert!(region_matches("Kochi, Kerala", "Kerala Coast"));
    }

    #[test]
    fn test_filters_are_a_conjunction() {
        let feed = sample_feed();

        let cricket = FeedFilter {
            sport: Some(Sport::Cricket),
            ..Default::default()
        };
        assert_eq!(feed.filter(&cricket).len(), 2);

        let cricket_in_kerala = FeedFilter {
            sport: Some(Sport::Cricket),
            region: Some("Kerala".to_string()),
            ..Default::default()
        };
        assert!(feed.filter(&cricket_in_kerala).is_empty());

        let search = FeedFilter {
            search: Some("ravi".to_string()),
            ..Default::default()
        };
        let found = feed.filter(&search);
        assert_eq!(found.len(), 1);
        assert!(matches!(found[0], FeedItem::Performance(p) if p.athlete_name == "Ravi"));
    }

    #[test]
    fn test_thresholds_apply_to_athletes_only() {
        let feed = sample_feed();
        let filter = FeedFilter {
            min_composite_score: Some(700),
            max_age: Some(18),
            ..Default::default()
        };
        let items = feed.filter(&filter);

        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], FeedItem::Opportunity(_)));
        assert!(matches!(items[1], FeedItem::Performance(p) if p.athlete_name == "Asha"));
    }

    #[test]
    fn test_view_resorts_without_refetch() {
        let feed = sample_feed();
        let by_index = feed.view(&FeedFilter::default(), FeedOrder::SportIndex);

        assert!(matches!(by_index[0], FeedItem::Performance(p) if p.sport_index == 880));
        assert!(matches!(by_index[1], FeedItem::Performance(p) if p.sport_index == 320));
        assert!(matches!(by_index[2], FeedItem::Opportunity(_)));
        assert_eq!(feed.len(), 3);
    }

    #[test]
    fn test_performance_item_carries_score_and_narrative() {
        let feed = sample_feed();
        let asha = feed
            .items()
            .iter()
            .find_map(|item| match item {
                FeedItem::Performance(p) if p.athlete_name == "Asha" => Some(p),
                _ => None,
            })
            .unwrap();

        assert_eq!(asha.tier, Tier::Pro);
        assert_eq!(asha.severity, Severity::Good);
        assert_eq!(asha.traits["stance"], "open");
        assert_eq!(
            asha.narrative.kind,
            narrative::NarrativeKind::ElitePerformer
        );
    }

    struct StubSource {
        posts: fn() -> Result<Vec<AuthoredPost>>,
        opportunities: fn() -> Result<Vec<Opportunity>>,
    }

    #[async_trait]
    impl FeedSource for StubSource {
        async fn performance_posts(&self) -> Result<Vec<AuthoredPost>> {
            (self.posts)()
        }

        async fn opportunities(&self) -> Result<Vec<Opportunity>> {
            (self.opportunities)()
        }
    }

    #[tokio::test]
    async fn test_load_feed_merges_both_sources() {
        let source = StubSource {
            posts: || {
                Ok(vec![authored(
                    athlete("Asha", Sport::Cricket, "Batsman", "Mumbai", 17),
                    1,
                    500,
                    500,
                )])
            },
            opportunities: || Ok(vec![opportunity("Trials", Sport::Cricket, "Mumbai", 2)]),
        };

        let feed = load_feed(&source).await.unwrap();
        assert_eq!(feed.len(), 2);
    }

    #[tokio::test]
    async fn test_load_feed_never_returns_partial_results() {
        let source = StubSource {
            posts: || Ok(Vec::new()),
            opportunities: || Err(StorageError::Database(sqlx::Error::PoolTimedOut)),
        };

        let err = load_feed(&source).await.unwrap_err();
        assert!(matches!(
            err,
            FeedError::Unavailable {
                origin: FeedSourceKind::Opportunities,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_load_feed_distinguishes_auth_failures() {
        let source = StubSource {
            posts: || Err(StorageError::Database(sqlx::Error::PoolClosed)),
            opportunities: || Err(StorageError::Forbidden("session expired".to_string())),
        };

        let err = load_feed(&source).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(matches!(
            err,
            FeedError::Unauthorized {
                origin: FeedSourceKind::Opportunities
            }
        ));
    }
}
