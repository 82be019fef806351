use std::sync::Arc;

use crate::application::ports::{ConversationStore, HotelDataProvider, LlmClient};
use crate::application::services::{RefinementService, SearchChatService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub refinement_service: Arc<RefinementService>,
    pub search_chat_service: Arc<SearchChatService>,
    pub conversation_store: Arc<dyn ConversationStore>,
    pub hotel_data: Arc<dyn HotelDataProvider>,
    pub settings: Settings,
}

impl AppState {
    /// Wires both chat services to one model client using the chat limits
    /// from `settings`.
    pub fn new(
        settings: Settings,
        llm_client: Arc<dyn LlmClient>,
        conversation_store: Arc<dyn ConversationStore>,
        hotel_data: Arc<dyn HotelDataProvider>,
    ) -> Self {
        let refinement_service = Arc::new(RefinementService::new(
            Arc::clone(&llm_client),
            settings.chat.refine_history_limit,
        ));
        let search_chat_service = Arc::new(SearchChatService::new(
            llm_client,
            settings.chat.history_limit,
            settings.chat.hotel_context_limit,
        ));

        Self {
            refinement_service,
            search_chat_service,
            conversation_store,
            hotel_data,
            settings,
        }
    }
}
