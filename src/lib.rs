//! wandr: an AI travel planner service.
//!
//! A free-text travel request goes through two sequential model calls: one
//! extracts a structured [`TravelIntent`], the other generates a full
//! [`TripPlan`] from it. Model output is recovered into JSON by
//! [`recover_json`], which never fails; unusable output degrades to `{}`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wandr::TripPlanner;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = TripPlanner::from_env()?;
//!
//!     let response = planner.plan("3 day trip to Paris with 4 friends, budget ₹1,00,000").await?;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod server;
pub mod services;
pub mod types;

pub use config::{PlannerConfig, ServerConfig};
pub use self::core::{recover_json, recover_json_traced, PlanStage, Recovery, RecoveryStage, TripPlanner};
pub use error::{PlannerError, Result};
pub use schemas::{inspect_plan, CompletionSchema, PlanIssue, SchemaHandle};
pub use server::{router, AppState};
pub use services::{AnthropicClient, CompletionRequest, LlmClient};
pub use types::{PlanResponse, TravelIntent, TripPlan};

#[cfg(feature = "cli")]
pub mod cli;
