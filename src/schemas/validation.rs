//! Plan contract checks.
//!
//! The model is asked to keep the budget breakdown equal to the total budget
//! and to produce one itinerary entry per day. Nothing enforces that; these
//! checks only report what was missed so it can be logged or shown.

use std::fmt;

use serde_json::Value;

use crate::{
    error::PlannerError,
    schemas::{CompletionSchema, SchemaHandle},
    types::{intent::TravelIntent, plan::TripPlan, response::PlanResponse},
};

const MAX_SCHEMA_ERRORS: usize = 3;
const BUDGET_TOLERANCE: f64 = 1.0;

/// Validate a structured payload against a schema
pub fn validate_structured_payload(
    schema: &SchemaHandle,
    payload: &Value,
) -> std::result::Result<(), PlannerError> {
    let validator = schema.validator().map_err(|err| {
        PlannerError::Validation(format!(
            "Failed to prepare `{}` schema for validation: {}",
            schema.schema_name(),
            err
        ))
    })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "structured payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(PlannerError::Validation(format!(
            "`{}` does not match its schema: {}",
            schema.schema_name(),
            detail_str
        )));
    }

    Ok(())
}

/// One way a recovered response misses what the prompts asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanIssue {
    /// Intent recovery produced nothing; defaults drove the plan prompt.
    EmptyIntent,
    /// Plan recovery produced nothing.
    EmptyPlan,
    /// A value does not fit the typed schema.
    Schema { detail: String },
    /// Budget categories do not add up to the total.
    BudgetMismatch { expected: f64, allocated: f64 },
    /// Day count differs from the requested duration.
    ItineraryLength { expected: u32, actual: usize },
}

impl fmt::Display for PlanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanIssue::EmptyIntent => write!(f, "intent could not be recovered; defaults used"),
            PlanIssue::EmptyPlan => write!(f, "plan could not be recovered"),
            PlanIssue::Schema { detail } => write!(f, "{}", detail),
            PlanIssue::BudgetMismatch {
                expected,
                allocated,
            } => write!(
                f,
                "budget breakdown allocates {} but total budget is {}",
                allocated, expected
            ),
            PlanIssue::ItineraryLength { expected, actual } => write!(
                f,
                "itinerary has {} day(s) but trip lasts {} day(s)",
                actual, expected
            ),
        }
    }
}

/// Report contract misses in a response without changing it.
pub fn inspect_plan(response: &PlanResponse) -> Vec<PlanIssue> {
    let mut issues = Vec::new();

    if is_empty_object(&response.intent) {
        issues.push(PlanIssue::EmptyIntent);
    } else if let Err(err) = validate_structured_payload(TravelIntent::schema(), &response.intent) {
        issues.push(PlanIssue::Schema {
            detail: err.to_string(),
        });
    }

    if is_empty_object(&response.plan) {
        issues.push(PlanIssue::EmptyPlan);
        return issues;
    }

    if let Err(err) = validate_structured_payload(TripPlan::schema(), &response.plan) {
        issues.push(PlanIssue::Schema {
            detail: err.to_string(),
        });
    }

    // A plan that fails typing was already reported above.
    let Ok(plan) = response.typed_plan() else {
        return issues;
    };
    let intent = response.resolved_intent();

    if !plan.budget_breakdown.is_empty() {
        let allocated = plan.allocated_budget();
        if (allocated - intent.total_budget).abs() > BUDGET_TOLERANCE {
            issues.push(PlanIssue::BudgetMismatch {
                expected: intent.total_budget,
                allocated,
            });
        }
    }

    if plan.itinerary.len() != intent.duration_days as usize {
        issues.push(PlanIssue::ItineraryLength {
            expected: intent.duration_days,
            actual: plan.itinerary.len(),
        });
    }

    issues
}

fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|map| map.is_empty())
}
