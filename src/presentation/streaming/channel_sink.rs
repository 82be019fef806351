use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::ports::{EventSink, SinkClosed};
use crate::domain::ChatEvent;

/// Feeds events to an SSE response body through a bounded channel.
///
/// When the client disconnects the body (and the receiver) is dropped, so the
/// next `send` reports [`SinkClosed`].
pub struct ChannelEventSink {
    sender: Option<mpsc::Sender<ChatEvent>>,
}

impl ChannelEventSink {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<ChatEvent>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }
}

#[async_trait]
impl EventSink for ChannelEventSink {
    async fn send(&mut self, event: ChatEvent) -> Result<(), SinkClosed> {
        let sender = self.sender.as_ref().ok_or(SinkClosed)?;
        sender.send(event).await.map_err(|_| SinkClosed)
    }

    async fn close(&mut self) {
        self.sender.take();
    }
}
