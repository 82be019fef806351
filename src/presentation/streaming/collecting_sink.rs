use async_trait::async_trait;

use crate::application::ports::{EventSink, SinkClosed};
use crate::domain::ChatEvent;

/// Buffers a whole session in memory; backs the plain JSON transport.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: Vec<ChatEvent>,
    closed: bool,
}

impl CollectingEventSink {
    pub fn events(&self) -> &[ChatEvent] {
        &self.events
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_events(self) -> Vec<ChatEvent> {
        self.events
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn send(&mut self, event: ChatEvent) -> Result<(), SinkClosed> {
        if self.closed {
            return Err(SinkClosed);
        }
        self.events.push(event);
        Ok(())
    }

    async fn close(&mut self) {
        self.closed = true;
    }
}
