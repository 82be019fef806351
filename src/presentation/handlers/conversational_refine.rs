use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::application::services::RefinementInput;
use crate::domain::{ChatMessage, ConversationId, SearchContext};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationalRefineBody {
    pub conversation_id: Option<String>,
    pub user_message: Option<String>,
    pub current_search: Option<String>,
    pub search_context: Option<SearchContext>,
    pub chat_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationalRefineResponse {
    pub success: bool,
    pub ai_response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refined_search: Option<String>,
    pub suggestions: Vec<String>,
    pub conversation_id: String,
}

struct ValidatedTurn {
    conversation_id: ConversationId,
    input: RefinementInput,
}

fn validate(body: ConversationalRefineBody) -> Result<ValidatedTurn, ApiError> {
    let raw_id = body.conversation_id.clone();

    let Some(conversation_id) = body.conversation_id.as_deref().and_then(ConversationId::parse)
    else {
        return Err(ApiError::validation_for("conversationId is required", raw_id));
    };

    let user_message = body
        .user_message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::validation_for("userMessage is required", raw_id.clone()))?
        .to_string();

    let current_search = body
        .current_search
        .ok_or_else(|| ApiError::validation_for("currentSearch is required", raw_id))?;

    Ok(ValidatedTurn {
        conversation_id,
        input: RefinementInput {
            user_message,
            current_search,
            search_context: body.search_context,
            chat_history: body.chat_history,
        },
    })
}

#[tracing::instrument(skip_all)]
pub async fn conversational_refine_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConversationalRefineBody>, JsonRejection>,
) -> Result<Json<ConversationalRefineResponse>, ApiError> {
    let Json(body) = payload?;
    let ValidatedTurn {
        conversation_id,
        input,
    } = validate(body)?;

    tracing::info!(
        conversation_id = %conversation_id,
        prompt = %sanitize_prompt(&input.user_message),
        "Refining search"
    );

    let mut history = input.chat_history.clone();
    history.push(ChatMessage::user(input.user_message.clone()));
    state
        .conversation_store
        .put(&conversation_id, history, input.search_context.clone());

    let result = state.refinement_service.refine(&input).await;

    Ok(Json(ConversationalRefineResponse {
        success: true,
        ai_response: result.response,
        refined_search: result.refined_search,
        suggestions: result.suggestions,
        conversation_id: conversation_id.to_string(),
    }))
}
