//! Prompt templates for the two completion calls.
//!
//! Both system prompts embed a literal example of the JSON the model must
//! return. The examples double as fixtures: a well-behaved model echoes their
//! shape back.

use serde_json::Value;

use crate::types::intent::TravelIntent;

/// Shape the intent extraction call must return.
pub const INTENT_EXAMPLE: &str = r#"{"destination":"city, country","duration_days":3,"total_budget":100000,"currency":"INR","num_travellers":4,"interest_type":"sightseeing","accommodation_pref":"mid-range","transport_pref":"flight","group_type":"friends"}"#;

/// Shape the plan generation call must return.
pub const PLAN_EXAMPLE: &str = r#"{
  "trip_title":"Catchy trip title",
  "summary":"2 exciting sentences about this trip",
  "weather":{"condition":"Sunny","avg_temp_c":22,"rain_prob":15,"icon":"☀️","packing_note":"Light layers recommended","alert":null},
  "transport":[
    {"id":"t1","mode":"flight","name":"Air India Non-stop","cost":45000,"departure":"10:00","arrival":"16:30","duration":"8h 30m","provider":"Air India","booking_url":"https://www.airindia.com","badge":"Recommended"},
    {"id":"t2","mode":"flight","name":"Emirates via Dubai","cost":38000,"departure":"02:00","arrival":"14:00","duration":"11h","provider":"Emirates","booking_url":"https://www.emirates.com","badge":"Best Value"},
    {"id":"t3","mode":"flight","name":"Budget Connecting","cost":30000,"departure":"06:00","arrival":"22:00","duration":"16h","provider":"IndiGo","booking_url":"https://www.goindigo.in","badge":"Budget"}
  ],
  "hotels":[
    {"id":"h1","name":"Hotel Name","stars":4,"location":"Central Area, City","cost_night":6000,"amenities":["WiFi","Breakfast","AC"],"map_query":"Hotel Name City Country","booking_url":"https://www.booking.com"},
    {"id":"h2","name":"Budget Hotel","stars":3,"location":"Old Town, City","cost_night":3200,"amenities":["WiFi","AC"],"map_query":"Budget Hotel City Country","booking_url":"https://www.agoda.com"},
    {"id":"h3","name":"Luxury Hotel","stars":5,"location":"Prime District, City","cost_night":14000,"amenities":["WiFi","Pool","Spa","Breakfast"],"map_query":"Luxury Hotel City Country","booking_url":"https://www.expedia.com"}
  ],
  "budget_breakdown":{"transport":45000,"hotel":24000,"food":15000,"activities":10000,"shopping":3000,"buffer":3000},
  "itinerary":[
    {"day":1,"theme":"Arrival & First Impressions","weather_note":"Clear and pleasant","activities":[
      {"time":"14:00","name":"Eiffel Tower","location":"Champ de Mars, Paris","duration_hours":2,"cost":500,"map_query":"Eiffel Tower Paris France","tip":"Book skip-the-line tickets online in advance"},
      {"time":"17:00","name":"Seine River Walk","location":"Pont Neuf, Paris","duration_hours":1.5,"cost":0,"map_query":"Pont Neuf Paris","tip":"Best at golden hour for photos"},
      {"time":"20:00","name":"Dinner at Le Marais","location":"Le Marais District, Paris","duration_hours":2,"cost":1500,"map_query":"Le Marais restaurants Paris","tip":"Try French onion soup and crème brûlée"}
    ]}
  ],
  "packing_list":{
    "clothing":["Light cotton shirts x4","Comfortable walking shoes","Formal outfit x1","Light jacket","Underwear & socks x5"],
    "toiletries":["Sunscreen SPF50","Lip balm","Travel toiletry kit","Hand sanitizer"],
    "documents":["Passport (valid 6+ months)","Travel insurance","Hotel bookings","Flight tickets","Visa printout"],
    "electronics":["Universal power adapter","Power bank 20000mAh","Smartphone + charger","Camera"],
    "medicines":["Pain relief tablets","ORS sachets","Antacids","Motion sickness pills"],
    "destination_specific":["Comfortable sandals","Reusable water bottle","Offline Google Maps downloaded"]
  },
  "events":["Local festival or event if applicable"],
  "booking_tips":["Book flights 2-3 months ahead","Use Booking.com for free cancellation hotels","Get travel insurance before departure","Download offline Google Maps"]
}"#;

const PLAN_RULES: &str = "RULES: budget_breakdown MUST sum to total_budget. Generate ALL days of itinerary (not just day 1) with 3-4 real activities each. Use real attraction names for the exact destination.";

/// System instruction for the intent extraction call.
pub fn intent_system_prompt() -> String {
    format!(
        "Extract travel intent from user input. Return ONLY valid JSON, no markdown, no explanation:\n\
         {INTENT_EXAMPLE}\n\
         Convert foreign currencies to INR (1 USD=83, 1 EUR=90 INR). Default budget 15000 INR if not mentioned."
    )
}

/// System instruction for the plan generation call.
pub fn plan_system_prompt() -> String {
    format!(
        "You are an expert world travel planner. Return ONLY valid JSON (no markdown fences, no explanation text before or after):\n\
         {PLAN_EXAMPLE}\n\
         {PLAN_RULES}"
    )
}

/// User message for the plan generation call.
///
/// `intent` is the raw recovered value and is embedded verbatim; the day count,
/// budget and destination come from its resolved view so that a missing field
/// never reaches the prompt.
pub fn plan_user_prompt(message: &str, intent: &Value, resolved: &TravelIntent) -> String {
    format!(
        "User: \"{}\"\nIntent: {}\nGenerate ALL {} days. Budget: {} INR. Destination: {}. Use real attraction names.",
        message, intent, resolved.duration_days, resolved.total_budget, resolved.destination
    )
}
