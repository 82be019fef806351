use async_trait::async_trait;

use crate::domain::ChatEvent;

#[derive(Debug, thiserror::Error)]
#[error("event sink closed")]
pub struct SinkClosed;

/// Transport-side receiver of chat events (SSE stream, JSON body, tests).
#[async_trait]
pub trait EventSink: Send {
    async fn send(&mut self, event: ChatEvent) -> Result<(), SinkClosed>;

    async fn close(&mut self);
}
