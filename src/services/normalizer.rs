use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::models::{Card, Credit, Offer, OfferAmount};

/// Normalizes raw card records into canonical cards
///
/// One card per record, in input order. Missing or mistyped fields fall back
/// to their defaults; nothing is rejected.
pub fn normalize(raw_records: &[Value]) -> Vec<Card> {
    raw_records.iter().map(normalize_record).collect()
}

/// Normalizes a single raw card record
pub fn normalize_record(raw: &Value) -> Card {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);

    Card {
        card_id: id_field(record, "cardId")
            .or_else(|| id_field(record, "id"))
            .unwrap_or_default(),
        name: string_field(record, "name").unwrap_or_default(),
        issuer: string_field(record, "issuer").unwrap_or_default(),
        network: string_field(record, "network").unwrap_or_else(|| "unknown".to_string()),
        currency: string_field(record, "currency").unwrap_or_else(|| "USD".to_string()),
        is_business: bool_field(record, "isBusiness"),
        annual_fee: number_field(record, "annualFee").unwrap_or(0.0),
        is_annual_fee_waived: bool_field(record, "isAnnualFeeWaived"),
        universal_cashback_percent: number_field(record, "universalCashbackPercent"),
        multipliers: multipliers(record.get("multipliers")),
        url: string_field(record, "url").unwrap_or_default(),
        image_url: string_field(record, "imageUrl").unwrap_or_default(),
        credits: credits(record.get("credits")),
        offers: offers(record.get("offers")),
        historical_offers: offers(record.get("historicalOffers")),
        discontinued: bool_field(record, "discontinued"),
    }
}

/// Folds `[{category, multiplier}]` into a map (later entries win) or keeps
/// an existing map's numeric entries.
fn multipliers(raw: Option<&Value>) -> HashMap<String, f64> {
    match raw {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let entry = entry.as_object()?;
                let category = entry.get("category")?.as_str()?;
                let multiplier = entry.get("multiplier")?.as_f64()?;
                Some((category.to_string(), multiplier))
            })
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(category, multiplier)| Some((category.clone(), multiplier.as_f64()?)))
            .collect(),
        _ => HashMap::new(),
    }
}

fn credits(raw: Option<&Value>) -> Vec<Credit> {
    array(raw)
        .iter()
        .map(|credit| {
            let empty = Map::new();
            let credit = credit.as_object().unwrap_or(&empty);
            Credit {
                description: string_field(credit, "description").unwrap_or_default(),
                value: number_field(credit, "value").unwrap_or(0.0),
                weight: number_field(credit, "weight").unwrap_or(1.0),
            }
        })
        .collect()
}

fn offers(raw: Option<&Value>) -> Vec<Offer> {
    array(raw)
        .iter()
        .map(|offer| {
            let empty = Map::new();
            let offer = offer.as_object().unwrap_or(&empty);
            Offer {
                spend: number_field(offer, "spend").unwrap_or(0.0),
                amount: array(offer.get("amount"))
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|amount| OfferAmount {
                        amount: number_field(amount, "amount").unwrap_or(0.0),
                        kind: string_field(amount, "type"),
                    })
                    .collect(),
                days: number_field(offer, "days")
                    .filter(|days| *days >= 0.0)
                    .map(|days| days as u32)
                    .unwrap_or(0),
                credits: credits(offer.get("credits")),
                details: string_field(offer, "details"),
                expiration: string_field(offer, "expiration"),
            }
        })
        .collect()
}

fn array(raw: Option<&Value>) -> &[Value] {
    raw.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

/// Non-empty string value
fn string_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Identifiers may arrive as numbers
fn id_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key) {
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => string_field(record, key),
    }
}

fn number_field(record: &Map<String, Value>, key: &str) -> Option<f64> {
    record.get(key).and_then(Value::as_f64)
}

fn bool_field(record: &Map<String, Value>, key: &str) -> bool {
    record.get(key).and_then(Value::as_bool).unwrap_or(false)
}
