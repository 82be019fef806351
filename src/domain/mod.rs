mod chat_event;
mod chat_message;
mod conversation_id;
mod conversation_state;
mod hotel;
mod message_role;
mod refinement;
mod review;
mod search_context;

pub use chat_event::ChatEvent;
pub use chat_message::ChatMessage;
pub use conversation_id::ConversationId;
pub use conversation_state::ConversationState;
pub use hotel::{HotelSummary, SearchParams};
pub use message_role::MessageRole;
pub use refinement::{MAX_SUGGESTIONS, RefinementResult};
pub use review::{ClassifiedReview, HotelReview, ReviewSentiment};
pub use search_context::SearchContext;
