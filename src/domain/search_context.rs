use serde::{Deserialize, Serialize};

/// Structured search state supplied by the client alongside a refinement turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchContext {
    pub location: Option<String>,
    #[serde(alias = "checkin")]
    pub check_in: Option<String>,
    #[serde(alias = "checkout")]
    pub check_out: Option<String>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub min_budget: Option<f64>,
    pub max_budget: Option<f64>,
    pub result_count: Option<u32>,
}

impl SearchContext {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
