use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{ApplicationHistoryEntry, Card, Constraints, Recommendation},
    services::{load_catalog, normalize, RecommendationEngine, UserContext},
};

use super::AppState;

/// Validated body of `POST /api/v1/optimize`
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeRequest {
    /// Cards the user already holds, normalized
    pub current_cards: Vec<Card>,
    pub upcoming_spend: f64,
    pub spending_category: Option<String>,
    pub application_history: Vec<ApplicationHistoryEntry>,
    pub constraints: Constraints,
}

impl OptimizeRequest {
    pub fn user_context(&self) -> UserContext<'_> {
        UserContext {
            held_cards: &self.current_cards,
            upcoming_spend: self.upcoming_spend,
            spending_category: self.spending_category.as_deref(),
            application_history: &self.application_history,
            constraints: Some(&self.constraints),
        }
    }
}

impl TryFrom<Value> for OptimizeRequest {
    type Error = AppError;

    fn try_from(mut body: Value) -> Result<Self, Self::Error> {
        let upcoming_spend = body
            .get("upcomingSpend")
            .and_then(Value::as_f64)
            .filter(|spend| *spend > 0.0)
            .ok_or_else(|| AppError::InvalidInput("Invalid upcoming spend".to_string()))?;

        let application_history = match body.get_mut("applicationHistory").map(Value::take) {
            Some(history @ Value::Array(_)) => serde_json::from_value(history).map_err(|_| {
                AppError::InvalidInput("Invalid application history format".to_string())
            })?,
            _ => {
                return Err(AppError::InvalidInput(
                    "Invalid application history format".to_string(),
                ))
            }
        };

        let constraints = match body.get_mut("constraints").map(Value::take) {
            Some(constraints) if !is_falsy(&constraints) => serde_json::from_value(constraints)
                .map_err(|_| AppError::InvalidInput("Invalid constraints format".to_string()))?,
            _ => {
                return Err(AppError::InvalidInput(
                    "Constraints object is required".to_string(),
                ))
            }
        };

        let current_cards = match body.get("currentCards") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(records)) => normalize(records),
            Some(_) => {
                return Err(AppError::InvalidInput(
                    "Invalid current cards format".to_string(),
                ))
            }
        };

        let spending_category = body
            .get("spendingCategory")
            .and_then(Value::as_str)
            .filter(|category| !category.is_empty())
            .map(str::to_string);

        Ok(Self {
            current_cards,
            upcoming_spend,
            spending_category,
            application_history,
            constraints,
        })
    }
}

/// `null`, `false`, `0` and `""` all count as an absent value
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Normalized card catalog
pub async fn list_cards(State(state): State<AppState>) -> AppResult<Json<Vec<Card>>> {
    let cards = load_catalog(state.card_source.as_ref()).await?;
    Ok(Json(cards))
}

/// Recommends the best cards the user does not hold yet
pub async fn optimize(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<Value>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let request = OptimizeRequest::try_from(body).inspect_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Rejected optimize request");
    })?;

    tracing::info!(
        request_id = %request_id,
        upcoming_spend = request.upcoming_spend,
        spending_category = request.spending_category.as_deref(),
        held_cards = request.current_cards.len(),
        history_entries = request.application_history.len(),
        "Processing optimize request"
    );

    let catalog = load_catalog(state.card_source.as_ref()).await?;
    let recommendations =
        RecommendationEngine::new(&state.settings).recommend(&request.user_context(), &catalog);

    tracing::info!(
        request_id = %request_id,
        recommended = recommendations.len(),
        "Optimize completed"
    );

    Ok(Json(recommendations))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_body() -> Value {
        json!({
            "currentCards": [{ "cardId": "chase-freedom", "issuer": "Chase" }],
            "upcomingSpend": 5000,
            "spendingCategory": "travel",
            "applicationHistory": [
                { "cardId": "amex-gold", "appliedAt": "2024-01-10" }
            ],
            "constraints": { "enforceIssuerRules": true }
        })
    }

    fn rejection(body: Value) -> String {
        match OptimizeRequest::try_from(body) {
            Err(AppError::InvalidInput(msg)) => msg,
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request_parses() {
        let request = OptimizeRequest::try_from(valid_body()).unwrap();

        assert_eq!(request.upcoming_spend, 5000.0);
        assert_eq!(request.spending_category.as_deref(), Some("travel"));
        assert_eq!(request.current_cards.len(), 1);
        assert_eq!(request.current_cards[0].card_id, "chase-freedom");
        assert_eq!(
            request.application_history,
            vec![ApplicationHistoryEntry::new("amex-gold", "2024-01-10")]
        );
        assert!(request.constraints.enforce_issuer_rules);
    }

    #[test]
    fn test_upcoming_spend_must_be_positive_number() {
        for spend in [json!(0), json!(-10), json!("5000"), Value::Null] {
            let mut body = valid_body();
            body["upcomingSpend"] = spend;
            assert_eq!(rejection(body), "Invalid upcoming spend");
        }

        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("upcomingSpend");
        assert_eq!(rejection(body), "Invalid upcoming spend");
    }

    #[test]
    fn test_application_history_must_be_array_of_entries() {
        let mut body = valid_body();
        body["applicationHistory"] = json!({ "cardId": "amex-gold" });
        assert_eq!(rejection(body), "Invalid application history format");

        let mut body = valid_body();
        body["applicationHistory"] = json!([{ "cardId": "amex-gold" }]);
        assert_eq!(rejection(body), "Invalid application history format");

        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("applicationHistory");
        assert_eq!(rejection(body), "Invalid application history format");
    }

    #[test]
    fn test_constraints_required() {
        let mut body = valid_body();
        body["constraints"] = Value::Null;
        assert_eq!(rejection(body), "Constraints object is required");

        for falsy in [json!(false), json!(0), json!(0.0), json!("")] {
            let mut body = valid_body();
            body["constraints"] = falsy;
            assert_eq!(rejection(body), "Constraints object is required");
        }

        for malformed in [json!("strict"), json!(1), json!(true)] {
            let mut body = valid_body();
            body["constraints"] = malformed;
            assert_eq!(rejection(body), "Invalid constraints format");
        }

        let mut body = valid_body();
        body["constraints"] = json!({});
        assert_eq!(
            OptimizeRequest::try_from(body).unwrap().constraints,
            Constraints::default()
        );
    }

    #[test]
    fn test_optional_fields() {
        let mut body = valid_body();
        let object = body.as_object_mut().unwrap();
        object.remove("currentCards");
        object.insert("spendingCategory".to_string(), json!(""));

        let request = OptimizeRequest::try_from(body).unwrap();
        assert!(request.current_cards.is_empty());
        assert_eq!(request.spending_category, None);

        let mut body = valid_body();
        body["currentCards"] = json!("chase-freedom");
        assert_eq!(rejection(body), "Invalid current cards format");
    }
}
