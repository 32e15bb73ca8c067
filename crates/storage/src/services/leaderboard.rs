use crate::dto::leaderboard::{LeaderboardEntry, LeaderboardQuery};
use crate::models::RankedAthlete;

use super::feed::region_matches;
use super::tier;

/// Regional leaderboard ordered by composite score, then sport index.
///
/// Only athletes with demonstrated skill (a non-zero sport index) are ranked;
/// athletes holding just the activity baseline are left out. Remaining ties
/// keep the input order.
pub fn rank(athletes: Vec<RankedAthlete>, query: &LeaderboardQuery) -> Vec<LeaderboardEntry> {
    let sport = query.sport_filter();
    let region = query.region.as_deref();

    let mut entries: Vec<RankedAthlete> = athletes
        .into_iter()
        .filter(|a| a.profile.is_athlete() && a.score.sport_index > 0)
        .filter(|a| sport.is_none_or(|s| a.profile.sport == Some(s)))
        .filter(|a| region.is_none_or(|r| region_matches(&a.profile.location, r)))
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .composite_score
            .cmp(&a.score.composite_score)
            .then(b.score.sport_index.cmp(&a.score.sport_index))
    });
    entries.truncate(query.effective_limit());

    entries
        .into_iter()
        .zip(1u32..)
        .map(|(RankedAthlete { profile, score }, rank)| LeaderboardEntry {
            rank,
            athlete_id: profile.user_id,
            name: profile.name,
            sport: profile.sport,
            player_role: profile.player_role,
            location: profile.location,
            composite_score: score.composite_score,
            sport_index: score.sport_index,
            tier: tier::classify(Some(score.composite_score)),
            severity: tier::severity(score.composite_score),
        })
        .collect()
}
