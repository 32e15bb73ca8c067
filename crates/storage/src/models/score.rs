use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::ScoreSnapshot;

/// Qualitative label derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum Tier {
    Unranked,
    Beginner,
    Rising,
    Developing,
    Pro,
    Elite,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unranked => "Unranked",
            Self::Beginner => "Beginner",
            Self::Rising => "Rising",
            Self::Developing => "Developing",
            Self::Pro => "Pro",
            Self::Elite => "Elite",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-band visual severity, independent of [`Tier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    Medium,
    Low,
}

/// Aggregated score for one athlete, recomputable at any time from its posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreRecord {
    /// Skill key to sub-score in [0, 1000]
    pub sub_scores: BTreeMap<String, u32>,
    pub sport_index: u32,
    pub composite_score: u32,
    pub activity_score: u32,
    pub tier: Tier,
    pub analysed_posts: usize,
    pub total_posts: usize,
}

impl ScoreRecord {
    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            sport_index: self.sport_index,
            composite_score: self.composite_score,
        }
    }
}
