pub mod schema;
pub mod validation;

pub use schema::{CompletionSchema, SchemaHandle};
pub use validation::{inspect_plan, validate_structured_payload, PlanIssue};
