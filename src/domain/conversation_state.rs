use chrono::{DateTime, Duration, Utc};

use super::{ChatMessage, SearchContext};

/// Server-side mirror of one conversation. Replaced wholesale on every write.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationState {
    pub history: Vec<ChatMessage>,
    pub context: Option<SearchContext>,
    pub last_activity: DateTime<Utc>,
}

impl ConversationState {
    pub fn new(
        history: Vec<ChatMessage>,
        context: Option<SearchContext>,
        last_activity: DateTime<Utc>,
    ) -> Self {
        Self {
            history,
            context,
            last_activity,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.last_activity) > ttl
    }
}
