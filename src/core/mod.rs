pub mod planner;
pub mod recovery;

pub use planner::{PlanStage, TripPlanner};
pub use recovery::{recover_json, recover_json_traced, Recovery, RecoveryStage};
