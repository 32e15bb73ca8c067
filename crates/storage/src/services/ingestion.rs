use std::collections::BTreeMap;

use crate::models::{MetricValue, RawMetrics};

pub const METRIC_MIN: f64 = 0.0;
pub const METRIC_MAX: f64 = 10.0;

/// A post's metric mapping split by kind, with invalid entries removed.
///
/// Keys are kept sorted so every consumer iterates them in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricPartition {
    pub quantitative: BTreeMap<String, f64>,
    pub qualitative: BTreeMap<String, String>,
}

impl MetricPartition {
    /// A post counts towards aggregation only with at least one valid numeric metric.
    pub fn is_analysed(&self) -> bool {
        !self.quantitative.is_empty()
    }

    /// Highest-valued quantitative metric. Equal values resolve to the smallest key.
    pub fn top_metric(&self) -> Option<(&str, f64)> {
        self.quantitative
            .iter()
            .fold(None, |best: Option<(&str, f64)>, (key, &value)| match best {
                Some((_, best_value)) if best_value >= value => best,
                _ => Some((key.as_str(), value)),
            })
    }
}

/// Accepts a rating only if it is finite and inside the 0 to 10 scale.
pub fn accept_rating(value: f64) -> Option<f64> {
    (value.is_finite() && (METRIC_MIN..=METRIC_MAX).contains(&value)).then_some(value)
}

/// Splits typed metric entries. Out-of-range ratings and blank traits are dropped.
pub fn partition_values<I, K>(entries: I) -> MetricPartition
where
    I: IntoIterator<Item = (K, MetricValue)>,
    K: Into<String>,
{
    let mut partition = MetricPartition::default();

    for (key, value) in entries {
        let key = key.into();
        if key.trim().is_empty() {
            continue;
        }

        match value {
            MetricValue::Numeric(rating) => {
                if let Some(rating) = accept_rating(rating) {
                    partition.quantitative.insert(key, rating);
                }
            }
            MetricValue::Trait(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    partition.qualitative.insert(key, text.to_string());
                }
            }
        }
    }

    partition
}

/// Partitions a raw JSON metric mapping. Never fails; unusable entries are skipped.
pub fn partition(raw: &RawMetrics) -> MetricPartition {
    partition_values(
        raw.iter()
            .filter_map(|(key, value)| MetricValue::from_json(value).map(|v| (key.clone(), v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawMetrics {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_partition_splits_numbers_and_traits() {
        let partition = partition(&raw(json!({
            "shot_power": 8.2,
            "footwork_rating": 6,
            "stance": "open",
        })));

        assert_eq!(partition.quantitative.len(), 2);
        assert_eq!(partition.quantitative["footwork_rating"], 6.0);
        assert_eq!(partition.qualitative["stance"], "open");
        assert!(partition.is_analysed());
    }

    #[test]
    fn test_partition_drops_invalid_ratings() {
        let partition = partition(&raw(json!({
            "too_high": 10.5,
            "negative": -0.1,
            "flag": true,
            "nothing": null,
            "nested": {"a": 1},
            "edge_low": 0,
            "edge_high": 10,
        })));

        assert_eq!(
            partition.quantitative.keys().collect::<Vec<_>>(),
            vec!["edge_high", "edge_low"]
        );
        assert!(partition.qualitative.is_empty());
    }

    #[test]
    fn test_non_finite_ratings_rejected() {
        assert_eq!(accept_rating(f64::NAN), None);
        assert_eq!(accept_rating(f64::INFINITY), None);
        assert_eq!(accept_rating(4.0), Some(4.0));

        let partition = partition_values([
            ("speed", MetricValue::Numeric(f64::NAN)),
            ("style", MetricValue::Trait("   ".to_string())),
        ]);
        assert_eq!(partition, MetricPartition::default());
    }

    #[test]
    fn test_empty_or_invalid_mapping_is_unanalysed() {
        assert!(!partition(&RawMetrics::new()).is_analysed());
        assert!(!partition(&raw(json!({"grip": "firm", "x": 42}))).is_analysed());
    }

    #[test]
    fn test_top_metric_prefers_highest_then_smallest_key() {
        let partition = partition(&raw(json!({
            "timing": 9.1,
            "agility": 9.1,
            "power": 7.0,
        })));
        assert_eq!(partition.top_metric(), Some(("agility", 9.1)));
        assert_eq!(MetricPartition::default().top_metric(), None);
    }
}
