use chrono::{DateTime, Duration, Utc};

use crate::domain::{ChatMessage, ConversationId, ConversationState, SearchContext};

/// Ephemeral per-conversation state.
///
/// Writes replace the whole record for a key. Two requests writing the same
/// conversation concurrently race with last-write-wins.
pub trait ConversationStore: Send + Sync {
    fn put(&self, id: &ConversationId, history: Vec<ChatMessage>, context: Option<SearchContext>);

    fn get(&self, id: &ConversationId) -> Option<ConversationState>;

    /// Drops every record idle for longer than `ttl` as of `now`.
    fn sweep(&self, now: DateTime<Utc>, ttl: Duration);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
