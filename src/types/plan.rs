use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured trip plan produced by the plan generation call.
///
/// Every field is optional on input; model output is best-effort and blanks
/// become empty values rather than errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TripPlan {
    /// Catchy title for the trip
    pub trip_title: String,
    /// Two-sentence pitch for the trip
    pub summary: String,
    /// Expected weather at the destination
    pub weather: Weather,
    /// Ways to get there, best option first
    pub transport: Vec<TransportOption>,
    /// Places to stay, in display order
    pub hotels: Vec<HotelOption>,
    /// Allocated amount per spending category; meant to sum to the total budget
    pub budget_breakdown: BTreeMap<String, f64>,
    /// One entry per trip day
    pub itinerary: Vec<DayPlan>,
    /// Items to pack, grouped by category
    pub packing_list: BTreeMap<String, Vec<String>>,
    /// Festivals or events during the trip
    pub events: Vec<String>,
    /// Practical booking advice
    pub booking_tips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Weather {
    pub condition: String,
    pub avg_temp_c: f64,
    /// Chance of rain, percent
    pub rain_prob: f64,
    pub icon: String,
    pub packing_note: String,
    pub alert: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TransportOption {
    pub id: String,
    /// "flight", "train", "bus", ...
    pub mode: String,
    pub name: String,
    pub cost: f64,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub provider: String,
    pub booking_url: String,
    /// "Recommended", "Best Value", "Budget"
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HotelOption {
    pub id: String,
    pub name: String,
    pub stars: f64,
    pub location: String,
    pub cost_night: f64,
    pub amenities: Vec<String>,
    /// Search string for a maps link
    pub map_query: String,
    pub booking_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DayPlan {
    /// 1-based day number
    pub day: u32,
    pub theme: String,
    pub weather_note: String,
    /// Activities in chronological order
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Activity {
    /// Local start time, "HH:MM"
    pub time: String,
    pub name: String,
    pub location: String,
    pub duration_hours: f64,
    pub cost: f64,
    pub map_query: String,
    pub tip: Option<String>,
}

impl TripPlan {
    /// Sum of all budget categories.
    pub fn allocated_budget(&self) -> f64 {
        self.budget_breakdown.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::prompts::PLAN_EXAMPLE;

    #[test]
    fn test_plan_example_deserializes() {
        let plan: TripPlan = serde_json::from_str(PLAN_EXAMPLE).unwrap();

        assert_eq!(plan.transport.len(), 3);
        assert_eq!(plan.hotels.len(), 3);
        assert_eq!(plan.itinerary.len(), 1);
        assert_eq!(plan.itinerary[0].activities.len(), 3);
        assert_eq!(plan.weather.alert, None);
        assert_eq!(plan.transport[0].badge.as_deref(), Some("Recommended"));
        assert_eq!(plan.allocated_budget(), 100000.0);
        assert!(plan.packing_list.contains_key("documents"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let plan: TripPlan =
            serde_json::from_value(serde_json::json!({ "trip_title": "Quick Goa" })).unwrap();
        assert_eq!(plan.trip_title, "Quick Goa");
        assert!(plan.itinerary.is_empty());
        assert_eq!(plan.allocated_budget(), 0.0);
    }
}
