use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_DURATION_DAYS: u32 = 3;
pub const DEFAULT_TOTAL_BUDGET: f64 = 15000.0;
pub const DEFAULT_NUM_TRAVELLERS: u32 = 1;
pub const DEFAULT_CURRENCY: &str = "INR";
pub const DEFAULT_DESTINATION: &str = "destination";

/// Structured interpretation of a free-text travel request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TravelIntent {
    /// Destination as "city, country"
    #[serde(default = "default_destination")]
    pub destination: String,
    /// Length of the trip in days
    #[serde(default = "default_duration_days")]
    pub duration_days: u32,
    /// Total budget for the whole group, in `currency`
    #[serde(default = "default_total_budget")]
    pub total_budget: f64,
    /// ISO 4217 code; foreign amounts are converted to INR by the model
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Number of people travelling
    #[serde(default = "default_num_travellers")]
    pub num_travellers: u32,
    /// e.g. "sightseeing", "adventure", "food"
    #[serde(default)]
    pub interest_type: String,
    /// e.g. "budget", "mid-range", "luxury"
    #[serde(default)]
    pub accommodation_pref: String,
    /// e.g. "flight", "train", "bus"
    #[serde(default)]
    pub transport_pref: String,
    /// e.g. "solo", "couple", "friends", "family"
    #[serde(default)]
    pub group_type: String,
}

impl Default for TravelIntent {
    fn default() -> Self {
        Self {
            destination: default_destination(),
            duration_days: DEFAULT_DURATION_DAYS,
            total_budget: DEFAULT_TOTAL_BUDGET,
            currency: default_currency(),
            num_travellers: DEFAULT_NUM_TRAVELLERS,
            interest_type: String::new(),
            accommodation_pref: String::new(),
            transport_pref: String::new(),
            group_type: String::new(),
        }
    }
}

impl TravelIntent {
    /// Lenient view over a recovered intent value.
    ///
    /// Unlike deserialization this never fails: each field is read on its own
    /// and anything absent, null, mistyped or non-positive takes its default.
    /// Numbers written as strings ("5", "1e5") are accepted.
    pub fn from_recovered(value: &Value) -> Self {
        let defaults = Self::default();
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            destination: text("destination")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.destination),
            duration_days: positive_count(value.get("duration_days"))
                .unwrap_or(defaults.duration_days),
            total_budget: positive_amount(value.get("total_budget"))
                .unwrap_or(defaults.total_budget),
            currency: text("currency")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.currency),
            num_travellers: positive_count(value.get("num_travellers"))
                .unwrap_or(defaults.num_travellers),
            interest_type: text("interest_type").unwrap_or_default(),
            accommodation_pref: text("accommodation_pref").unwrap_or_default(),
            transport_pref: text("transport_pref").unwrap_or_default(),
            group_type: text("group_type").unwrap_or_default(),
        }
    }

    /// Budget share per traveller.
    pub fn budget_per_person(&self) -> f64 {
        self.total_budget / self.num_travellers.max(1) as f64
    }
}

fn positive_amount(value: Option<&Value>) -> Option<f64> {
    let amount = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

fn positive_count(value: Option<&Value>) -> Option<u32> {
    let count = positive_amount(value)?.round();
    (count >= 1.0 && count <= u32::MAX as f64).then_some(count as u32)
}

fn default_destination() -> String {
    DEFAULT_DESTINATION.to_string()
}

fn default_duration_days() -> u32 {
    DEFAULT_DURATION_DAYS
}

fn default_total_budget() -> f64 {
    DEFAULT_TOTAL_BUDGET
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_num_travellers() -> u32 {
    DEFAULT_NUM_TRAVELLERS
}
