use crate::dto::shortlist::{ShortlistCandidate, ShortlistRequest};
use crate::error::Result;
use crate::models::{RankedAthlete, Role, Session, Sport};

use super::tier;

/// Only recruiters may generate shortlists.
pub fn authorize(session: &Session) -> Result<()> {
    session.require_role(Role::Recruiter)
}

/// Resolved shortlist criteria
#[derive(Debug, Clone, Default)]
pub struct ShortlistCriteria {
    pub sport: Option<Sport>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub region: Option<String>,
    pub min_sport_index: Option<u32>,
    pub limit: usize,
}

impl ShortlistCriteria {
    pub fn from_request(request: &ShortlistRequest) -> std::result::Result<Self, String> {
        Ok(Self {
            sport: request.sport_filter()?,
            age_min: request.age_min,
            age_max: request.age_max,
            region: request
                .region
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_lowercase),
            min_sport_index: request.min_sport_index,
            limit: request.effective_limit(),
        })
    }

    fn admits(&self, athlete: &RankedAthlete) -> bool {
        let profile = &athlete.profile;

        if !profile.is_athlete() {
            return false;
        }
        if self.sport.is_some_and(|sport| profile.sport != Some(sport)) {
            return false;
        }
        if let Some(region) = &self.region
            && !profile.location.to_lowercase().contains(region.as_str())
        {
            return false;
        }
        if self.age_min.is_some() || self.age_max.is_some() {
            let Some(age) = profile.age.and_then(|a| u32::try_from(a).ok()) else {
                return false;
            };
            if self.age_min.is_some_and(|min| age < min) || self.age_max.is_some_and(|max| age > max) {
                return false;
            }
        }

        self.min_sport_index
            .is_none_or(|min| athlete.score.sport_index >= min)
    }
}

/// Filters, orders by sport index (descending, ties in input order) and truncates.
pub fn rank(athletes: Vec<RankedAthlete>, criteria: &ShortlistCriteria) -> Vec<ShortlistCandidate> {
    let mut admitted: Vec<RankedAthlete> = athletes
        .into_iter()
        .filter(|athlete| criteria.admits(athlete))
        .collect();

    admitted.sort_by(|a, b| b.score.sport_index.cmp(&a.score.sport_index));
    admitted.truncate(criteria.limit);

    admitted
        .into_iter()
        .map(|RankedAthlete { profile, score }| ShortlistCandidate {
            athlete_id: profile.user_id,
            name: profile.name,
            email: profile.email,
            phone_number: profile.phone_number,
            sport: profile.sport,
            sport_index: score.sport_index,
            composite_score: score.composite_score,
            tier: tier::classify(Some(score.composite_score)),
            player_role: profile.player_role,
            location: profile.location,
            age: profile.age,
        })
        .collect()
}
