use serde::{Deserialize, Serialize};

use super::Card;

/// A scored card suggestion returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub card: Card,
    /// Months to wait before applying; scheduling is not modelled, always 0
    pub apply_after_months: u32,
    /// Net first-year value in USD
    pub expected_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Recommendation {
    pub fn new(card: Card, expected_value: f64) -> Self {
        Self {
            card,
            apply_after_months: 0,
            expected_value,
            reason: None,
        }
    }
}
