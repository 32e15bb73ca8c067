use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Opportunity, Sport};

/// Request payload for posting a new opportunity
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOpportunityRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    pub sport: Sport,

    #[validate(length(min = 1, max = 100, message = "Role is required"))]
    pub role: String,

    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: String,

    #[validate(length(min = 1, max = 100, message = "Date is required"))]
    pub date: String,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,
}

/// Applicant as seen by the recruiter who posted the opportunity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicantSummary {
    pub athlete_id: Uuid,
    pub name: String,
    pub email: String,
    pub location: String,
    pub sport: Option<Sport>,
    pub player_role: Option<String>,
    pub sport_index: u32,
    pub composite_score: u32,
    pub applied_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OpportunityWithApplicants {
    #[serde(flatten)]
    pub opportunity: Opportunity,
    pub applicant_details: Vec<ApplicantSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplyResponse {
    pub message: String,
    pub opportunity: Opportunity,
}
