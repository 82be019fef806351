use std::sync::Arc;

use futures::stream::StreamExt;

use crate::application::ports::{EventSink, LlmClient, LlmClientError, SinkClosed};
use crate::domain::{ChatEvent, ChatMessage, HotelSummary, SearchParams};

use super::prompt_builder::build_search_chat_messages;
use super::refine_marker::extract_refine_marker;

const STREAM_FAILURE_MESSAGE: &str =
    "Sorry, I'm having trouble responding right now. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct SearchChatRequest {
    pub message: String,
    pub conversation_history: Vec<ChatMessage>,
    pub current_search: Option<String>,
    pub hotel_context: Vec<HotelSummary>,
    pub search_params: Option<SearchParams>,
}

#[derive(Debug, thiserror::Error)]
enum RelayError {
    #[error("llm: {0}")]
    Llm(#[from] LlmClientError),
    #[error(transparent)]
    SinkClosed(#[from] SinkClosed),
}

pub struct SearchChatService {
    llm_client: Arc<dyn LlmClient>,
    history_limit: usize,
    hotel_context_limit: usize,
}

impl SearchChatService {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        history_limit: usize,
        hotel_context_limit: usize,
    ) -> Self {
        Self {
            llm_client,
            history_limit,
            hotel_context_limit,
        }
    }

    /// Streams one chat turn into `sink` and closes it.
    ///
    /// Emits `connected`, then a `content` event per model token in arrival
    /// order, then exactly one `complete` or `error`. Stops quietly once the
    /// sink reports the client has gone.
    pub async fn stream_to<S>(&self, request: &SearchChatRequest, sink: &mut S)
    where
        S: EventSink + ?Sized,
    {
        if sink.send(ChatEvent::Connected).await.is_ok() {
            match self.relay_tokens(request, sink).await {
                Ok(full_text) => {
                    let reply = extract_refine_marker(&full_text);
                    tracing::info!(
                        refines = reply.should_refine_search(),
                        "Search chat completed"
                    );
                    let complete = ChatEvent::Complete {
                        should_refine_search: reply.should_refine_search(),
                        full_response: reply.visible_text,
                        refined_query: reply.refined_query,
                    };
                    let _ = sink.send(complete).await;
                }
                Err(RelayError::SinkClosed(_)) => {
                    tracing::debug!("Client disconnected mid-stream");
                }
                Err(RelayError::Llm(e)) => {
                    tracing::error!(error = %e, "Search chat stream failed");
                    let _ = sink
                        .send(ChatEvent::Error {
                            message: STREAM_FAILURE_MESSAGE.to_string(),
                        })
                        .await;
                }
            }
        }
        sink.close().await;
    }

    async fn relay_tokens<S>(
        &self,
        request: &SearchChatRequest,
        sink: &mut S,
    ) -> Result<String, RelayError>
    where
        S: EventSink + ?Sized,
    {
        let messages =
            build_search_chat_messages(request, self.history_limit, self.hotel_context_limit);
        let mut tokens = self.llm_client.complete_stream(&messages).await?;

        let mut full_text = String::new();
        while let Some(token) = tokens.next().await {
            let token = token?;
            if token.is_empty() {
                continue;
            }
            full_text.push_str(&token);
            sink.send(ChatEvent::Content { content: token }).await?;
        }
        Ok(full_text)
    }
}
