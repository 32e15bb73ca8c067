use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::metric::RawMetrics;
use super::user::{Profile, ScoreSnapshot};

/// A clip submitted by an athlete. Metrics arrive later from the analysis service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PerformancePost {
    pub post_id: Uuid,
    pub athlete_id: Uuid,
    pub created_at: NaiveDateTime,
    #[schema(value_type = Object)]
    pub metrics: RawMetrics,
    pub summary: Option<String>,
    pub media_ref: Option<String>,
}

/// A post resolved to its author and the author's cached score
#[derive(Debug, Clone)]
pub struct AuthoredPost {
    pub post: PerformancePost,
    pub author: Profile,
    pub score: ScoreSnapshot,
}
