mod channel_sink;
mod collecting_sink;

pub use channel_sink::ChannelEventSink;
pub use collecting_sink::CollectingEventSink;
