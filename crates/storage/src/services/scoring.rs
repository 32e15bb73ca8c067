//! Score aggregation.
//!
//! This is the only place the scoring formula lives. Feeds, shortlists,
//! leaderboards and the score cache all consume [`score_posts`] output.
//!
//! ```text
//! avg_k          = mean of metric k over analysed posts containing k   (0..10)
//! sub_score_k    = round(avg_k * 100)
//! raw_index      = mean over distinct keys of avg_k * 100
//! sport_index    = round(raw_index * confidence(n_analysed))
//! activity       = 150 below 3 total posts, else 200
//! composite      = round(sport_index * 0.5 + activity)
//! ```

use std::collections::BTreeMap;

use super::ingestion::{self, MetricPartition};
use super::tier;
use crate::models::{PerformancePost, ScoreRecord};

pub const SCORE_MAX: u32 = 1000;

const ACTIVITY_BASELINE: u32 = 100;
const ENGAGEMENT_CREDIT: u32 = 50;
const ESTABLISHED_CREDIT: u32 = 50;
const ESTABLISHED_POST_COUNT: usize = 3;
const SPORT_INDEX_WEIGHT: f64 = 0.5;

/// Rounds and clips a score into [0, 1000].
fn clip(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, SCORE_MAX as f64) as u32
}

/// Discount applied to the sport index for small samples of analysed posts.
pub fn confidence_multiplier(analysed_posts: usize) -> f64 {
    match analysed_posts {
        0 => 0.0,
        1 => 0.8,
        2 => 0.9,
        _ => 1.0,
    }
}

/// Flat engagement credit based on total uploads, analysed or not.
pub fn activity_score(total_posts: usize) -> u32 {
    let mut score = ACTIVITY_BASELINE + ENGAGEMENT_CREDIT;
    if total_posts >= ESTABLISHED_POST_COUNT {
        score += ESTABLISHED_CREDIT;
    }
    score
}

pub fn composite_score(sport_index: u32, activity_score: u32) -> u32 {
    clip(sport_index as f64 * SPORT_INDEX_WEIGHT + activity_score as f64)
}

/// Aggregates already-partitioned posts. Unanalysed partitions only count towards activity.
pub fn score_partitions(partitions: &[MetricPartition]) -> ScoreRecord {
    let total_posts = partitions.len();
    let analysed: Vec<&MetricPartition> = partitions.iter().filter(|p| p.is_analysed()).collect();

    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for partition in &analysed {
        for (key, &value) in &partition.quantitative {
            let entry = sums.entry(key.as_str()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    let mut sub_scores = BTreeMap::new();
    let mut scaled_total = 0.0;
    for (key, (sum, count)) in &sums {
        let scaled = sum / *count as f64 * 100.0;
        sub_scores.insert((*key).to_string(), clip(scaled));
        scaled_total += scaled;
    }

    let sport_index = if sums.is_empty() {
        0
    } else {
        let raw_index = scaled_total / sums.len() as f64;
        clip(raw_index * confidence_multiplier(analysed.len()))
    };

    let activity = activity_score(total_posts);
    let composite = composite_score(sport_index, activity);

    ScoreRecord {
        sub_scores,
        sport_index,
        composite_score: composite,
        activity_score: activity,
        tier: tier::classify(Some(composite)),
        analysed_posts: analysed.len(),
        total_posts,
    }
}

/// Score of an athlete without posts, also what an athlete that was never scored reports.
pub fn baseline() -> ScoreRecord {
    score_partitions(&[])
}

/// Computes the full score record for an athlete from its current posts.
pub fn score_posts(posts: &[PerformancePost]) -> ScoreRecord {
    let partitions: Vec<MetricPartition> = posts
        .iter()
        .map(|post| ingestion::partition(&post.metrics))
        .collect();

    score_partitions(&partitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetricValue, Tier};
    use chrono::NaiveDate;
    use serde_json::json;
    use uuid::Uuid;

    fn partition(entries: &[(&str, f64)]) -> MetricPartition {
        ingestion::partition_values(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), MetricValue::Numeric(*v))),
        )
    }

    fn post(metrics: serde_json::Value) -> PerformancePost {
        PerformancePost {
            post_id: Uuid::new_v4(),
            athlete_id: Uuid::nil(),
            created_at: NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            metrics: metrics.as_object().cloned().unwrap_or_default(),
            summary: None,
            media_ref: None,
        }
    }

    #[test]
    fn test_no_posts_is_baseline() {
        let record = score_partitions(&[]);
        assert!(record.sub_scores.is_empty());
        assert_eq!(record.sport_index, 0);
        assert_eq!(record.composite_score, 150);
        assert_eq!(record.tier, Tier::Beginner);
        assert_eq!(baseline(), record);
        assert_eq!(score_posts(&[]), record);
    }

    #[test]
    fn test_unanalysed_posts_only_earn_activity() {
        let two = vec![MetricPartition::default(); 2];
        let record = score_partitions(&two);
        assert_eq!(record.sport_index, 0);
        assert_eq!(record.composite_score, 150);

        let four = vec![MetricPartition::default(); 4];
        let record = score_partitions(&four);
        assert_eq!(record.sport_index, 0);
        assert_eq!(record.composite_score, 200);
        assert_eq!(record.analysed_posts, 0);
        assert_eq!(record.total_posts, 4);
    }

    #[test]
    fn test_confidence_multiplier_steps() {
        assert_eq!(confidence_multiplier(1), 0.8);
        assert_eq!(confidence_multiplier(2), 0.9);
        for n in 3..50 {
            assert_eq!(confidence_multiplier(n), 1.0);
        }
    }

    #[test]
    fn test_single_analysed_post() {
        let record = score_partitions(&[partition(&[("speed", 8.0), ("accuracy", 6.0)])]);

        assert_eq!(record.sub_scores["speed"], 800);
        assert_eq!(record.sub_scores["accuracy"], 600);
        // raw 700 * 0.8
        assert_eq!(record.sport_index, 560);
        assert_eq!(record.activity_score, 150);
        assert_eq!(record.composite_score, 430);
        assert_eq!(record.tier, Tier::Rising);
    }

    #[test]
    fn test_keys_weighted_equally_regardless_of_post_count() {
        let record = score_partitions(&[
            partition(&[("speed", 9.0), ("accuracy", 5.0)]),
            partition(&[("speed", 7.0)]),
            partition(&[("speed", 8.0)]),
        ]);

        assert_eq!(record.sub_scores["speed"], 800);
        assert_eq!(record.sub_scores["accuracy"], 500);
        assert_eq!(record.sport_index, 650);
        assert_eq!(record.composite_score, 525);
    }

    #[test]
    fn test_multiplier_uses_analysed_count_not_total() {
        let record = score_partitions(&[
            partition(&[("speed", 10.0)]),
            MetricPartition::default(),
            MetricPartition::default(),
        ]);

        assert_eq!(record.analysed_posts, 1);
        assert_eq!(record.sport_index, 800);
        assert_eq!(record.activity_score, 200);
        assert_eq!(record.composite_score, 600);
    }

    #[test]
    fn test_perfect_scores_stay_in_range() {
        let posts = vec![partition(&[("a", 10.0), ("b", 10.0)]); 5];
        let record = score_partitions(&posts);
        assert_eq!(record.sport_index, 1000);
        assert_eq!(record.composite_score, 700);
        assert!(record.sub_scores.values().all(|s| *s <= SCORE_MAX));
    }

    #[test]
    fn test_sub_scores_bounded_for_valid_inputs() {
        let mut value = 0.0;
        while value <= 10.0 {
            let record = score_partitions(&[partition(&[("k", value)])]);
            assert!(record.sub_scores["k"] <= SCORE_MAX);
            assert!(record.sport_index <= SCORE_MAX);
            assert!(record.composite_score <= SCORE_MAX);
            value += 0.25;
        }
    }

    #[test]
    fn test_composite_monotonic_in_sport_index() {
        for activity in [150, 200] {
            let mut previous = 0;
            for sport_index in 0..=SCORE_MAX {
                let composite = composite_score(sport_index, activity);
                assert!(composite >= previous);
                previous = composite;
            }
        }
    }

    #[test]
    fn test_score_posts_ignores_invalid_metrics() {
        let posts = vec![
            post(json!({"speed": 7.0, "stance": "closed", "bogus": 42})),
            post(json!({})),
            post(json!({"speed": "fast"})),
        ];
        let record = score_posts(&posts);

        assert_eq!(record.analysed_posts, 1);
        assert_eq!(record.total_posts, 3);
        assert_eq!(record.sub_scores.len(), 1);
        assert_eq!(record.sport_index, 560);
        assert_eq!(record.composite_score, 480);
    }

    #[test]
    fn test_activity_tiers() {
        assert_eq!(activity_score(0), 150);
        assert_eq!(activity_score(2), 150);
        assert_eq!(activity_score(3), 200);
        assert_eq!(activity_score(300), 200);
    }
}
