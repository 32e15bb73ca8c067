use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Raw metric mapping as attached by the analysis service.
pub type RawMetrics = serde_json::Map<String, Value>;

/// One entry of a post's metric mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MetricValue {
    /// Quantitative rating on the 0 to 10 scale
    Numeric(f64),
    /// Categorical trait such as a batting stance
    Trait(String),
}

impl MetricValue {
    /// Reads a JSON value; anything that is neither a number nor a string yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Self::Numeric),
            Value::String(s) => Some(Self::Trait(s.clone())),
            _ => None,
        }
    }
}
