use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use tracing::Instrument;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::services::SearchChatRequest;
use crate::domain::{ChatEvent, ChatMessage, HotelSummary, SearchParams};
use crate::infrastructure::observability::{RequestId, sanitize_prompt};
use crate::presentation::state::AppState;
use crate::presentation::streaming::{ChannelEventSink, CollectingEventSink};

use super::error::ApiError;

const EVENT_BUFFER: usize = 64;
const HEARTBEAT_TEXT: &str = "heartbeat";

// Sse already sends content-type and cache-control.
const SSE_HEADERS: [(&str, &str); 2] = [("connection", "keep-alive"), ("x-accel-buffering", "no")];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchChatBody {
    pub message: String,
    pub conversation_history: Vec<ChatMessage>,
    pub current_search: Option<String>,
    pub hotel_context: Vec<HotelSummary>,
    pub search_params: Option<SearchParams>,
}

impl SearchChatBody {
    /// GET carries the structured fields as JSON-encoded query parameters.
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, ApiError> {
        Ok(Self {
            message: query.get("message").cloned().unwrap_or_default(),
            conversation_history: parse_json_param(query, "conversationHistory")?
                .unwrap_or_default(),
            current_search: query
                .get("currentSearch")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            hotel_context: parse_json_param(query, "hotelContext")?.unwrap_or_default(),
            search_params: parse_json_param(query, "searchParams")?,
        })
    }

    pub fn into_request(self) -> Result<SearchChatRequest, ApiError> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ApiError::validation("Message is required"));
        }

        Ok(SearchChatRequest {
            message: message.to_string(),
            conversation_history: self.conversation_history,
            current_search: self.current_search,
            hotel_context: self.hotel_context,
            search_params: self.search_params,
        })
    }
}

fn parse_json_param<T: DeserializeOwned>(
    query: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, ApiError> {
    let Some(raw) = query.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    serde_json::from_str(raw)
        .map(Some)
        .map_err(|e| ApiError::validation(format!("Invalid {key} parameter: {e}")))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchChatResponse {
    pub success: bool,
    pub response: String,
    pub should_refine_search: bool,
    pub refined_query: Option<String>,
    pub conversation_history: Vec<ChatMessage>,
}

#[tracing::instrument(skip_all)]
pub async fn search_chat_stream_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let request = SearchChatBody::from_query(&query)?.into_request()?;
    tracing::debug!(prompt = %sanitize_prompt(&request.message), "Opening search chat stream");

    let (mut sink, mut events) = ChannelEventSink::new(EVENT_BUFFER);
    let service = Arc::clone(&state.search_chat_service);
    let stream_span = tracing::info_span!("search_chat_stream", request_id = %request_id);
    tokio::spawn(
        async move {
            service.stream_to(&request, &mut sink).await;
        }
        .instrument(stream_span),
    );

    let sse_stream = async_stream::stream! {
        while let Some(event) = events.recv().await {
            yield Event::default().json_data(&event);
        }
    };

    let sse = Sse::new(sse_stream).keep_alive(
        KeepAlive::new()
            .interval(state.settings.heartbeat_interval())
            .text(HEARTBEAT_TEXT),
    );

    Ok((SSE_HEADERS, sse).into_response())
}

#[tracing::instrument(skip_all)]
pub async fn search_chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchChatBody>, JsonRejection>,
) -> Result<Json<SearchChatResponse>, ApiError> {
    let Json(body) = payload?;
    let request = body.into_request()?;
    tracing::debug!(prompt = %sanitize_prompt(&request.message), "Processing search chat");

    let mut sink = CollectingEventSink::default();
    state.search_chat_service.stream_to(&request, &mut sink).await;

    let completion = sink.into_events().into_iter().find_map(|event| match event {
        ChatEvent::Complete {
            full_response,
            should_refine_search,
            refined_query,
        } => Some((full_response, should_refine_search, refined_query)),
        _ => None,
    });

    let Some((full_response, should_refine_search, refined_query)) = completion else {
        let details = state
            .settings
            .environment
            .exposes_error_details()
            .then(|| "model stream ended without a completion".to_string());
        return Err(ApiError::internal("Failed to generate response", details));
    };

    let mut conversation_history = request.conversation_history;
    conversation_history.push(ChatMessage::user(request.message));
    conversation_history.push(ChatMessage::assistant(full_response.clone()));

    Ok(Json(SearchChatResponse {
        success: true,
        response: full_response,
        should_refine_search,
        refined_query,
        conversation_history,
    }))
}
