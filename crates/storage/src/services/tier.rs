use crate::models::{Severity, Tier};

/// Maps a composite score to its tier. Missing and zero scores are unranked.
pub fn classify(composite_score: Option<u32>) -> Tier {
    match composite_score {
        None | Some(0) => Tier::Unranked,
        Some(s) if s >= 800 => Tier::Elite,
        Some(s) if s >= 700 => Tier::Pro,
        Some(s) if s >= 500 => Tier::Developing,
        Some(s) if s >= 400 => Tier::Rising,
        Some(_) => Tier::Beginner,
    }
}

/// Coarse good/medium/low band used for highlighting. Not a tier.
pub fn severity(score: u32) -> Severity {
    if score >= 700 {
        Severity::Good
    } else if score >= 400 {
        Severity::Medium
    } else {
        Severity::Low
    }
}
