use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{PerformancePost, RawMetrics, ScoreRecord};
use crate::services::ingestion;

/// Request payload for submitting a new clip
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    /// Opaque handle from the media store
    #[validate(length(min = 1, max = 500, message = "media_ref must be between 1 and 500 characters"))]
    pub media_ref: Option<String>,
}

/// Analysis result attached by the AI service
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AttachAnalysisRequest {
    #[schema(value_type = Object)]
    #[serde(default)]
    pub metrics: RawMetrics,

    #[validate(length(max = 2000))]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub post_id: Uuid,
    pub athlete_id: Uuid,
    pub created_at: NaiveDateTime,
    #[schema(value_type = Object)]
    pub metrics: RawMetrics,
    pub summary: Option<String>,
    pub media_ref: Option<String>,
    pub analysed: bool,
}

impl From<PerformancePost> for PostResponse {
    fn from(post: PerformancePost) -> Self {
        let analysed = ingestion::partition(&post.metrics).is_analysed();
        Self {
            post_id: post.post_id,
            athlete_id: post.athlete_id,
            created_at: post.created_at,
            metrics: post.metrics,
            summary: post.summary,
            media_ref: post.media_ref,
            analysed,
        }
    }
}

/// Post after analysis together with the owner's refreshed score
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResponse {
    pub post: PostResponse,
    pub score: ScoreRecord,
}
