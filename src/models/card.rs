use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical credit card record produced by the normalizer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub card_id: String,
    pub name: String,
    pub issuer: String,
    pub network: String,
    pub currency: String,
    pub is_business: bool,
    /// Annual fee in USD
    pub annual_fee: f64,
    pub is_annual_fee_waived: bool,
    /// Baseline earn rate in percent (1.0 means 1% back); `None` when the
    /// source record leaves it out, which is not the same as an explicit 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universal_cashback_percent: Option<f64>,
    /// Category name to earn rate in percent
    pub multipliers: HashMap<String, f64>,
    pub url: String,
    pub image_url: String,
    pub credits: Vec<Credit>,
    pub offers: Vec<Offer>,
    pub historical_offers: Vec<Offer>,
    pub discontinued: bool,
}

impl Card {
    /// Lower-cased issuer name, used for every issuer comparison
    pub fn issuer_key(&self) -> String {
        self.issuer.to_lowercase()
    }

    /// Smallest spend threshold across current offers, 0 without offers
    pub fn minimum_offer_spend(&self) -> f64 {
        self.offers
            .iter()
            .map(|offer| offer.spend)
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    /// Largest bonus (in points) any current offer can pay out, 0 without offers
    pub fn max_offer_bonus(&self) -> f64 {
        self.offers
            .iter()
            .map(Offer::max_amount)
            .reduce(f64::max)
            .unwrap_or(0.0)
    }
}

/// Statement credit attached to a card or an offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credit {
    pub description: String,
    pub value: f64,
    /// How much of the face value a typical cardholder realizes
    pub weight: f64,
}

/// Signup bonus: earn one of `amount` after spending `spend` within `days`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    pub spend: f64,
    pub amount: Vec<OfferAmount>,
    pub days: u32,
    pub credits: Vec<Credit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
}

impl Offer {
    /// Best payout of this offer; an offer without amounts is worth nothing
    pub fn max_amount(&self) -> f64 {
        self.amount
            .iter()
            .map(|a| a.amount)
            .reduce(f64::max)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfferAmount {
    pub amount: f64,
    /// Reward currency of the payout, e.g. "points" or "cash"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
