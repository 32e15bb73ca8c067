use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::StorageError;

/// Account role as asserted by the identity gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Athlete,
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Athlete => "athlete",
            Self::Recruiter => "recruiter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "athlete" => Ok(Self::Athlete),
            "recruiter" => Ok(Self::Recruiter),
            other => Err(StorageError::InvalidValue(format!("unknown role '{other}'"))),
        }
    }
}

/// Sports supported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Sport {
    Cricket,
    Football,
    Badminton,
}

impl Sport {
    pub const ALL: [Sport; 3] = [Sport::Cricket, Sport::Football, Sport::Badminton];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cricket => "Cricket",
            Self::Football => "Football",
            Self::Badminton => "Badminton",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::ALL
            .into_iter()
            .find(|sport| sport.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StorageError::InvalidValue(format!("unknown sport '{}'", s.trim())))
    }
}

/// A registered user. Athletes carry sport attributes, recruiters an organization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    pub sport: Option<Sport>,
    pub player_role: Option<String>,
    pub location: String,
    pub age: Option<i32>,
    pub organization: Option<String>,
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Profile {
    pub fn is_athlete(&self) -> bool {
        self.role == Role::Athlete
    }
}

/// Last cached aggregator output for an athlete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreSnapshot {
    pub sport_index: u32,
    pub composite_score: u32,
}

/// Athlete profile joined with its cached score, the unit every ranked view works on
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankedAthlete {
    pub profile: Profile,
    pub score: ScoreSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_parsing_is_case_insensitive() {
        assert_eq!("cricket".parse::<Sport>().unwrap(), Sport::Cricket);
        assert_eq!(" FOOTBALL ".parse::<Sport>().unwrap(), Sport::Football);
        assert!("Chess".parse::<Sport>().is_err());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Athlete, Role::Recruiter] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("admin".parse::<Role>().is_err());
    }
}
