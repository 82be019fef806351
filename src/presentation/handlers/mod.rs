mod conversational_refine;
mod error;
mod health;
mod hotels;
mod search_chat;

pub use conversational_refine::{
    ConversationalRefineBody, ConversationalRefineResponse, conversational_refine_handler,
};
pub use error::ApiError;
pub use health::{HealthResponse, health_handler};
pub use hotels::{ask_hotel_handler, hotel_details_handler, hotel_reviews_handler};
pub use search_chat::{
    SearchChatBody, SearchChatResponse, search_chat_handler, search_chat_stream_handler,
};
