use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{RankedAthlete, Sport, Tier};
use crate::services::{saved::Membership, tier};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToggleSavedResponse {
    pub athlete_id: Uuid,
    pub membership: Membership,
    pub saved_athletes: Vec<Uuid>,
}

/// Saved athlete as shown on the recruiter dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SavedAthleteResponse {
    pub athlete_id: Uuid,
    pub name: String,
    pub location: String,
    pub sport: Option<Sport>,
    pub player_role: Option<String>,
    pub bio: Option<String>,
    pub sport_index: u32,
    pub composite_score: u32,
    pub tier: Tier,
}

impl From<RankedAthlete> for SavedAthleteResponse {
    fn from(athlete: RankedAthlete) -> Self {
        let RankedAthlete { profile, score } = athlete;
        Self {
            athlete_id: profile.user_id,
            name: profile.name,
            location: profile.location,
            sport: profile.sport,
            player_role: profile.player_role,
            bio: profile.bio,
            sport_index: score.sport_index,
            composite_score: score.composite_score,
            tier: tier::classify(Some(score.composite_score)),
        }
    }
}
