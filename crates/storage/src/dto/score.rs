use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{ScoreRecord, Severity};

/// Live score for one athlete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteScoreResponse {
    pub athlete_id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub record: ScoreRecord,
    pub severity: Severity,
}
