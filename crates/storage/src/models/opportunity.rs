use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::Sport;

/// Trial or selection event posted by a recruiter
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Opportunity {
    pub opportunity_id: Uuid,
    pub recruiter_id: Uuid,
    pub recruiter_name: String,
    pub organization: Option<String>,
    pub title: String,
    pub sport: Sport,
    pub role: String,
    pub location: String,
    /// Free text, e.g. "To be announced"
    pub date: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    /// Unique athlete ids in application order
    pub applicants: Vec<Uuid>,
}
