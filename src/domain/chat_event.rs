use serde::{Deserialize, Serialize};

/// One frame of the search chat protocol.
///
/// A session always emits `Connected` first, any number of `Content`
/// deltas, then exactly one `Complete` or `Error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatEvent {
    Connected,
    Content {
        content: String,
    },
    #[serde(rename_all = "camelCase")]
    Complete {
        full_response: String,
        should_refine_search: bool,
        refined_query: Option<String>,
    },
    Error {
        message: String,
    },
}

impl ChatEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChatEvent::Complete { .. } | ChatEvent::Error { .. })
    }
}
