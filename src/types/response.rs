use std::any::{type_name, TypeId};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{PlannerError, Result},
    schemas::{CompletionSchema, SchemaHandle},
    types::{intent::TravelIntent, plan::TripPlan},
};

/// What `/api/plan` returns: both recovered values, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub intent: Value,
    pub plan: Value,
}

impl PlanResponse {
    pub fn new(intent: Value, plan: Value) -> Self {
        Self { intent, plan }
    }

    /// Lenient intent view with defaults applied.
    pub fn resolved_intent(&self) -> TravelIntent {
        TravelIntent::from_recovered(&self.intent)
    }

    /// Strict plan view; fails with the path of the first mistyped field.
    pub fn typed_plan(&self) -> Result<TripPlan> {
        deserialize_structured_response::<TripPlan>(&self.plan, TripPlan::schema())
    }
}

pub fn deserialize_structured_response<T>(payload: &Value, schema: &SchemaHandle) -> Result<T>
where
    T: CompletionSchema,
{
    ensure_schema_matches::<T>(schema)?;

    let raw = payload.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::Validation(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })?;

    Ok(value)
}

fn ensure_schema_matches<T: 'static>(schema: &SchemaHandle) -> Result<()> {
    if schema.type_id() != TypeId::of::<T>() {
        return Err(PlannerError::Validation(format!(
            "schema `{}` does not match target type `{}`",
            schema.schema_name(),
            type_name::<T>(),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_plan_reports_field_path() {
        let response = PlanResponse::new(
            json!({}),
            json!({ "itinerary": [{ "day": 1, "activities": [{ "cost": "free" }] }] }),
        );

        let err = response.typed_plan().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("trip_plan"), "{message}");
        assert!(message.contains("itinerary[0].activities[0].cost"), "{message}");
    }

    #[test]
    fn test_schema_mismatch_is_rejected() {
        let err = deserialize_structured_response::<TripPlan>(&json!({}), TravelIntent::schema())
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_response_serializes_as_intent_and_plan() {
        let response = PlanResponse::new(json!({ "destination": "Goa" }), json!({}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({ "intent": { "destination": "Goa" }, "plan": {} }));
        assert_eq!(response.resolved_intent().destination, "Goa");
    }
}
