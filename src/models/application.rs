use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A past card application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationHistoryEntry {
    pub card_id: String,
    /// ISO-8601 date or date-time
    pub applied_at: String,
}

impl ApplicationHistoryEntry {
    pub fn new(card_id: impl Into<String>, applied_at: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            applied_at: applied_at.into(),
        }
    }

    /// Parsed application time; `None` when the timestamp is unreadable.
    ///
    /// Seconds are optional. Date-only and offset-less values are read as UTC.
    pub fn applied_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.applied_at.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
            return Some(parsed.with_timezone(&Utc));
        }

        let local = raw.strip_suffix(|c: char| c == 'Z' || c == 'z').unwrap_or(raw);
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(local, format) {
                return Some(naive.and_utc());
            }
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Application cap for one issuer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IssuerLimit {
    pub max_apps: u32,
    pub months: u32,
}

/// Issuer rules the user wants enforced
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    /// Enables the built-in issuer rules (Chase 5/24)
    pub enforce_issuer_rules: bool,
    /// A card's welcome bonus can only be earned once
    pub enforce_lifetime_bonus: bool,
    /// Issuer name to application cap
    pub max_apps_per_issuer_in_months: HashMap<String, IssuerLimit>,
}

impl Constraints {
    /// Cap configured for `issuer`, matching keys case-insensitively
    pub fn issuer_limit(&self, issuer: &str) -> Option<IssuerLimit> {
        let issuer = issuer.to_lowercase();
        self.max_apps_per_issuer_in_months
            .iter()
            .find(|(name, _)| name.to_lowercase() == issuer)
            .map(|(_, limit)| *limit)
    }
}
