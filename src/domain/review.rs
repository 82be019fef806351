use serde::{Deserialize, Serialize};

/// Guest review as returned by the hotel-data provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelReview {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub traveler_type: Option<String>,
    /// 0..10 scale.
    pub average_score: Option<f64>,
    pub language: Option<String>,
    pub headline: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub date: Option<String>,
}

impl HotelReview {
    pub fn body_text(&self) -> String {
        [&self.headline, &self.pros, &self.cons]
            .into_iter()
            .flatten()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSentiment {
    Positive,
    Mixed,
    Negative,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedReview {
    #[serde(flatten)]
    pub review: HotelReview,
    pub sentiment: ReviewSentiment,
    pub generic: bool,
}
