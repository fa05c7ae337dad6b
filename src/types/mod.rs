pub mod intent;
pub mod plan;
pub mod response;

pub use intent::TravelIntent;
pub use plan::{Activity, DayPlan, HotelOption, TransportOption, TripPlan, Weather};
pub use response::{deserialize_structured_response, PlanResponse};
