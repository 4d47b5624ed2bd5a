use std::collections::HashMap;

use chrono::{DateTime, Months, Utc};
use thiserror::Error;

use crate::models::{ApplicationHistoryEntry, Card, Constraints, IssuerLimit, Recommendation};

/// Points earned per USD; offer bonuses are quoted on this scale
pub const POINTS_PER_USD: f64 = 100.0;
/// Earn rate when a card has neither a category multiplier nor a baseline rate
pub const DEFAULT_EARN_RATE: f64 = 0.01;
pub const MAX_RECOMMENDATIONS: usize = 3;

pub const CHASE_ISSUER: &str = "chase";
pub const CHASE_MAX_APPS: u32 = 5;
pub const CHASE_WINDOW_MONTHS: u32 = 24;

/// Tunables of the scoring model
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub points_per_usd: f64,
    pub default_earn_rate: f64,
    pub max_recommendations: usize,
    /// Issuer rules applied when the user enables `enforceIssuerRules`.
    ///
    /// Keyed by lower-cased issuer; these count every application on record,
    /// whichever issuer it went to.
    pub issuer_rules: HashMap<String, IssuerLimit>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            points_per_usd: POINTS_PER_USD,
            default_earn_rate: DEFAULT_EARN_RATE,
            max_recommendations: MAX_RECOMMENDATIONS,
            issuer_rules: HashMap::from([(
                CHASE_ISSUER.to_string(),
                IssuerLimit {
                    max_apps: CHASE_MAX_APPS,
                    months: CHASE_WINDOW_MONTHS,
                },
            )]),
        }
    }
}

/// Why a candidate card was left out of the recommendations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Exclusion {
    #[error("card is already held")]
    AlreadyHeld,
    #[error("{issuer} rule: {count} applications in {months} months (max {max_apps})")]
    IssuerRule {
        issuer: String,
        count: usize,
        max_apps: u32,
        months: u32,
    },
    #[error("{issuer} cap: {count} applications in {months} months (max {max_apps})")]
    IssuerCap {
        issuer: String,
        count: usize,
        max_apps: u32,
        months: u32,
    },
    #[error("welcome bonus already used")]
    LifetimeBonusUsed,
    #[error("spend below offer minimum of {required}")]
    BelowMinimumSpend { required: f64 },
    #[error("net value of {total_points} points is not positive")]
    NonPositiveValue { total_points: f64 },
}

/// Everything the engine knows about the user
#[derive(Debug, Clone, Copy)]
pub struct UserContext<'a> {
    pub held_cards: &'a [Card],
    /// Projected spend in USD
    pub upcoming_spend: f64,
    pub spending_category: Option<&'a str>,
    pub application_history: &'a [ApplicationHistoryEntry],
    pub constraints: Option<&'a Constraints>,
}

/// Scores and ranks candidate cards for one user
///
/// Every candidate is judged on its own: filters run first (held cards,
/// issuer rules, lifetime bonus, minimum spend), then the first-year value is
/// computed as signup bonus plus earned rewards minus the annual fee.
pub struct RecommendationEngine<'a> {
    settings: &'a EngineSettings,
    now: DateTime<Utc>,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(settings: &'a EngineSettings) -> Self {
        Self {
            settings,
            now: Utc::now(),
        }
    }

    /// Evaluates application windows relative to `now` instead of the clock
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Top candidates by expected value, best first
    pub fn recommend(&self, user: &UserContext<'_>, all_cards: &[Card]) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = all_cards
            .iter()
            .filter_map(|card| match self.evaluate(user, card) {
                Ok(recommendation) => Some(recommendation),
                Err(exclusion) => {
                    tracing::debug!(
                        card_id = %card.card_id,
                        reason = %exclusion,
                        "Card excluded"
                    );
                    None
                }
            })
            .collect();

        let eligible = recommendations.len();

        // sort_by is stable: ties keep catalog order
        recommendations.sort_by(|a, b| {
            b.expected_value
                .partial_cmp(&a.expected_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        recommendations.truncate(self.settings.max_recommendations);

        tracing::info!(
            candidates = all_cards.len(),
            eligible,
            returned = recommendations.len(),
            best_value = recommendations.first().map(|r| r.expected_value),
            "Recommendations computed"
        );

        recommendations
    }

    /// Scores a single candidate, or says why it was excluded
    pub fn evaluate(
        &self,
        user: &UserContext<'_>,
        card: &Card,
    ) -> Result<Recommendation, Exclusion> {
        if user.held_cards.iter().any(|held| held.card_id == card.card_id) {
            return Err(Exclusion::AlreadyHeld);
        }

        if let Some(constraints) = user.constraints {
            self.check_constraints(user.application_history, constraints, card)?;
        }

        let required = card.minimum_offer_spend();
        if user.upcoming_spend < required {
            return Err(Exclusion::BelowMinimumSpend { required });
        }

        let points_per_usd = self.settings.points_per_usd;
        let bonus_points = card.max_offer_bonus();
        let earn_rate = self.earn_rate(card, user.spending_category);
        let earned_points = user.upcoming_spend * earn_rate * points_per_usd;
        let fee_points = if card.is_annual_fee_waived {
            0.0
        } else {
            card.annual_fee
        } * points_per_usd;

        let total_points = bonus_points + earned_points - fee_points;
        if total_points <= 0.0 {
            return Err(Exclusion::NonPositiveValue { total_points });
        }

        Ok(Recommendation::new(card.clone(), total_points / points_per_usd))
    }

    fn check_constraints(
        &self,
        history: &[ApplicationHistoryEntry],
        constraints: &Constraints,
        card: &Card,
    ) -> Result<(), Exclusion> {
        let issuer = card.issuer_key();

        if constraints.enforce_issuer_rules {
            if let Some(rule) = self.settings.issuer_rules.get(&issuer) {
                let count = self.count_within(history.iter(), rule.months);
                if count >= rule.max_apps as usize {
                    return Err(Exclusion::IssuerRule {
                        issuer,
                        count,
                        max_apps: rule.max_apps,
                        months: rule.months,
                    });
                }
            }
        }

        if let Some(limit) = constraints.issuer_limit(&issuer) {
            // Applications are attributed to an issuer by card ID prefix
            let issuer_apps = history
                .iter()
                .filter(|entry| entry.card_id.to_lowercase().starts_with(&issuer));
            let count = self.count_within(issuer_apps, limit.months);
            if count >= limit.max_apps as usize {
                return Err(Exclusion::IssuerCap {
                    issuer,
                    count,
                    max_apps: limit.max_apps,
                    months: limit.months,
                });
            }
        }

        if constraints.enforce_lifetime_bonus
            && history.iter().any(|entry| entry.card_id == card.card_id)
        {
            return Err(Exclusion::LifetimeBonusUsed);
        }

        Ok(())
    }

    /// Applications strictly after `now` minus `months` calendar months
    fn count_within<'h>(
        &self,
        entries: impl Iterator<Item = &'h ApplicationHistoryEntry>,
        months: u32,
    ) -> usize {
        let cutoff = self
            .now
            .checked_sub_months(Months::new(months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        entries
            .filter_map(ApplicationHistoryEntry::applied_time)
            .filter(|applied_at| *applied_at > cutoff)
            .count()
    }

    /// Reward rate as a fraction of spend
    fn earn_rate(&self, card: &Card, spending_category: Option<&str>) -> f64 {
        if let Some(multiplier) = spending_category.and_then(|c| card.multipliers.get(c)) {
            return multiplier / 100.0;
        }
        match card.universal_cashback_percent {
            Some(percent) => percent / 100.0,
            None => self.settings.default_earn_rate,
        }
    }
}

/// Recommends up to three cards the user does not hold, with default settings
pub fn recommend(
    held_cards: &[Card],
    upcoming_spend: f64,
    all_cards: &[Card],
    spending_category: Option<&str>,
    application_history: Option<&[ApplicationHistoryEntry]>,
    constraints: Option<&Constraints>,
) -> Vec<Recommendation> {
    let settings = EngineSettings::default();
    let user = UserContext {
        held_cards,
        upcoming_spend,
        spending_category,
        application_history: application_history.unwrap_or(&[]),
        constraints,
    };
    RecommendationEngine::new(&settings).recommend(&user, all_cards)
}
