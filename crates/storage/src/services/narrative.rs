use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Sport;

const ELITE_COMPOSITE: u32 = 700;
const EXCEPTIONAL_METRIC: f64 = 8.5;

/// Inputs for picking a post's one-line narrative.
#[derive(Debug, Clone, Copy, Default)]
pub struct NarrativeContext<'a> {
    pub composite_score: Option<u32>,
    pub sport: Option<Sport>,
    pub top_metric: Option<(&'a str, f64)>,
    pub player_role: Option<&'a str>,
    pub summary: Option<&'a str>,
    pub quantitative_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeKind {
    ElitePerformer,
    ExceptionalMetric,
    Positional,
    Summary,
    MetricCount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Narrative {
    pub kind: NarrativeKind,
    pub text: String,
}

/// Picks exactly one sentence; the first matching rule wins.
pub fn select(ctx: &NarrativeContext<'_>) -> Narrative {
    if let Some(score) = ctx.composite_score.filter(|s| *s >= ELITE_COMPOSITE) {
        let sport = ctx.sport.map(|s| s.as_str()).unwrap_or("their sport");
        return Narrative {
            kind: NarrativeKind::ElitePerformer,
            text: format!(
                "Elite performer: MetaScore {score} puts them in the top tier of {sport}."
            ),
        };
    }

    if let Some((key, value)) = ctx.top_metric.filter(|(_, v)| *v >= EXCEPTIONAL_METRIC) {
        return Narrative {
            kind: NarrativeKind::ExceptionalMetric,
            text: format!(
                "Exceptional {} of {}/10, a standout metric in this clip.",
                metric_label(key),
                value
            ),
        };
    }

    if let Some(role) = non_blank(ctx.player_role) {
        return Narrative {
            kind: NarrativeKind::Positional,
            text: format!("Scouted as a {role}: AI confirms strong positional awareness."),
        };
    }

    if let Some(summary) = non_blank(ctx.summary) {
        return Narrative {
            kind: NarrativeKind::Summary,
            text: format!("\"{summary}\""),
        };
    }

    Narrative {
        kind: NarrativeKind::MetricCount,
        text: format!(
            "{} AI performance metrics extracted from this session.",
            ctx.quantitative_count
        ),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Turns `shot_power_score` into `shot power`: underscores become spaces and
/// the first "score" or "rating" (any case) is removed.
pub fn metric_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let lowered = spaced.to_ascii_lowercase();

    let cut = ["score", "rating"]
        .iter()
        .filter_map(|word| lowered.find(word).map(|at| (at, word.len())))
        .min_by_key(|(at, _)| *at);

    let label = match cut {
        Some((at, len)) => format!("{}{}", &spaced[..at], &spaced[at + len..]),
        None => spaced,
    };

    let label = label.trim();
    if label.is_empty() {
        key.to_string()
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_context() -> NarrativeContext<'static> {
        NarrativeContext {
            composite_score: Some(750),
            sport: Some(Sport::Cricket),
            top_metric: Some(("bat_speed", 9.4)),
            player_role: Some("Batsman"),
            summary: Some("Clean cover drive"),
            quantitative_count: 4,
        }
    }

    #[test]
    fn test_elite_wins_over_everything() {
        let narrative = select(&full_context());
        assert_eq!(narrative.kind, NarrativeKind::ElitePerformer);
        assert_eq!(
            narrative.text,
            "Elite performer: MetaScore 750 puts them in the top tier of Cricket."
        );
    }

    #[test]
    fn test_priority_order() {
        let mut ctx = full_context();
        ctx.composite_score = Some(699);
        let narrative = select(&ctx);
        assert_eq!(narrative.kind, NarrativeKind::ExceptionalMetric);
        assert_eq!(
            narrative.text,
            "Exceptional bat speed of 9.4/10, a standout metric in this clip."
        );

        ctx.top_metric = Some(("bat_speed", 8.4));
        let narrative = select(&ctx);
        assert_eq!(narrative.kind, NarrativeKind::Positional);
        assert!(narrative.text.contains("Batsman"));

        ctx.player_role = None;
        let narrative = select(&ctx);
        assert_eq!(narrative.kind, NarrativeKind::Summary);
        assert_eq!(narrative.text, "\"Clean cover drive\"");

        ctx.summary = Some("  ");
        let narrative = select(&ctx);
        assert_eq!(narrative.kind, NarrativeKind::MetricCount);
        assert_eq!(
            narrative.text,
            "4 AI performance metrics extracted from this session."
        );
    }

    #[test]
    fn test_elite_without_sport() {
        let ctx = NarrativeContext {
            composite_score: Some(700),
            ..Default::default()
        };
        assert_eq!(
            select(&ctx).text,
            "Elite performer: MetaScore 700 puts them in the top tier of their sport."
        );
    }

    #[test]
    fn test_exceptional_threshold_is_inclusive() {
        let ctx = NarrativeContext {
            top_metric: Some(("footwork", 8.5)),
            ..Default::default()
        };
        assert_eq!(select(&ctx).kind, NarrativeKind::ExceptionalMetric);
    }

    #[test]
    fn test_empty_context_falls_back_to_count() {
        let narrative = select(&NarrativeContext::default());
        assert_eq!(narrative.kind, NarrativeKind::MetricCount);
        assert!(narrative.text.starts_with("0 AI performance metrics"));
    }

    #[test]
    fn test_metric_label() {
        assert_eq!(metric_label("shot_power_score"), "shot power");
        assert_eq!(metric_label("Rating_of_reflexes"), "of reflexes");
        assert_eq!(metric_label("agility"), "agility");
        assert_eq!(metric_label("score"), "score");
    }
}
