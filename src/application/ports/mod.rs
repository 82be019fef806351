mod clock;
mod conversation_store;
mod event_sink;
mod hotel_data_provider;
mod llm_client;

pub use clock::Clock;
pub use conversation_store::ConversationStore;
pub use event_sink::{EventSink, SinkClosed};
pub use hotel_data_provider::{HotelDataError, HotelDataProvider};
pub use llm_client::{LlmClient, LlmClientError, LlmTokenStream};
