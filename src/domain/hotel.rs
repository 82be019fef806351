use serde::{Deserialize, Serialize};

/// Hotel shown to the user, forwarded as context for the search chat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelSummary {
    pub id: Option<String>,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub rating: Option<f64>,
    pub ai_match_percent: Option<f64>,
    pub top_amenities: Vec<String>,
    pub distance_from_search: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub location: Option<String>,
}
