use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::application::ports::{Clock, ConversationStore};
use crate::domain::{ChatMessage, ConversationId, ConversationState, SearchContext};

/// Process-local conversation store. Nothing survives a restart and state is
/// not shared between server instances.
pub struct InMemoryConversationStore {
    entries: DashMap<ConversationId, ConversationState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryConversationStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn put(&self, id: &ConversationId, history: Vec<ChatMessage>, context: Option<SearchContext>) {
        let state = ConversationState::new(history, context, self.clock.now());
        self.entries.insert(id.clone(), state);
    }

    fn get(&self, id: &ConversationId) -> Option<ConversationState> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    fn sweep(&self, now: DateTime<Utc>, ttl: Duration) {
        self.entries.retain(|_, state| !state.is_expired(now, ttl));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
