use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::parse_sport_filter;
use crate::models::{Sport, Tier};

pub const DEFAULT_SHORTLIST_LIMIT: u32 = 10;
/// Upper bound on candidates per shortlist, keeps report rendering cheap
pub const MAX_SHORTLIST_LIMIT: u32 = 50;

/// Recruiter criteria for an automated shortlist
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_age_range"))]
pub struct ShortlistRequest {
    /// Sport name, or "All"/"Any" for every sport
    #[validate(length(max = 50))]
    pub sport: Option<String>,

    #[validate(range(min = 1, max = 120, message = "age_min must be between 1 and 120"))]
    pub age_min: Option<u32>,

    #[validate(range(min = 1, max = 120, message = "age_max must be between 1 and 120"))]
    pub age_max: Option<u32>,

    /// Case-insensitive substring of the athlete's location
    #[validate(length(max = 255))]
    pub region: Option<String>,

    #[validate(range(max = 1000, message = "min_sport_index must be at most 1000"))]
    pub min_sport_index: Option<u32>,

    #[validate(range(min = 1, max = 50, message = "limit must be between 1 and 50"))]
    pub limit: Option<u32>,
}

fn validate_age_range(request: &ShortlistRequest) -> Result<(), ValidationError> {
    match (request.age_min, request.age_max) {
        (Some(min), Some(max)) if min > max => {
            let mut error = ValidationError::new("age_range");
            error.message = Some("age_min must not exceed age_max".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

impl ShortlistRequest {
    pub fn sport_filter(&self) -> Result<Option<Sport>, String> {
        parse_sport_filter(self.sport.as_deref())
    }

    /// Requested size, defaulted and capped.
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_SHORTLIST_LIMIT)
            .clamp(1, MAX_SHORTLIST_LIMIT) as usize
    }
}

/// One shortlisted athlete, the fixed field set handed to the report renderer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShortlistCandidate {
    pub athlete_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub sport: Option<Sport>,
    pub sport_index: u32,
    pub composite_score: u32,
    pub tier: Tier,
    pub player_role: Option<String>,
    pub location: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShortlistResponse {
    pub generated_at: NaiveDateTime,
    pub recruiter_id: Uuid,
    pub criteria: ShortlistRequest,
    pub candidates: Vec<ShortlistCandidate>,
}
