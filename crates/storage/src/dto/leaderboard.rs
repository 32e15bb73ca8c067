use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common::parse_sport_filter;
use crate::models::{Severity, Sport, Tier};

pub const DEFAULT_LEADERBOARD_SIZE: u32 = 25;
pub const MAX_LEADERBOARD_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    pub sport: Option<String>,
    /// Region label, matched approximately against athlete locations
    pub region: Option<String>,
    pub limit: Option<u32>,
}

impl LeaderboardQuery {
    pub fn validate(&self) -> Result<(), String> {
        parse_sport_filter(self.sport.as_deref())?;

        if let Some(limit) = self.limit
            && !(1..=MAX_LEADERBOARD_SIZE).contains(&limit)
        {
            return Err(format!("limit must be between 1 and {MAX_LEADERBOARD_SIZE}"));
        }

        Ok(())
    }

    pub fn sport_filter(&self) -> Option<Sport> {
        parse_sport_filter(self.sport.as_deref()).ok().flatten()
    }

    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_LEADERBOARD_SIZE)
            .clamp(1, MAX_LEADERBOARD_SIZE) as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub athlete_id: Uuid,
    pub name: String,
    pub sport: Option<Sport>,
    pub player_role: Option<String>,
    pub location: String,
    pub composite_score: u32,
    pub sport_index: u32,
    pub tier: Tier,
    pub severity: Severity,
}
