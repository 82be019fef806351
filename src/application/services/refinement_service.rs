use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::LlmClient;
use crate::domain::{ChatMessage, RefinementResult, SearchContext};

use super::prompt_builder::build_refine_messages;
use super::rule_based_refiner::refine_with_rules;

#[derive(Debug, Clone, Default)]
pub struct RefinementInput {
    pub user_message: String,
    pub current_search: String,
    pub search_context: Option<SearchContext>,
    pub chat_history: Vec<ChatMessage>,
}

/// Outcome of asking the model for a refinement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelAttempt {
    Answered(RefinementResult),
    Unavailable(String),
}

/// Picks the model's answer when there is one, otherwise the rule-based one.
pub fn resolve_refinement(attempt: ModelAttempt, input: &RefinementInput) -> RefinementResult {
    match attempt {
        ModelAttempt::Answered(result) => result,
        ModelAttempt::Unavailable(reason) => {
            tracing::warn!(reason = %reason, "Model refinement unavailable, using rule-based fallback");
            refine_with_rules(&input.user_message, &input.current_search)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelReplyError {
    #[error("no JSON object in reply")]
    MissingJson,
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("empty response text")]
    EmptyResponse,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelRefinement {
    response: String,
    #[serde(default)]
    refined_search: Option<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Parses the `{response, refinedSearch, suggestions}` contract, tolerating
/// code fences or prose around the JSON object.
pub fn parse_model_refinement(content: &str) -> Result<RefinementResult, ModelReplyError> {
    let start = content.find('{').ok_or(ModelReplyError::MissingJson)?;
    let end = content.rfind('}').ok_or(ModelReplyError::MissingJson)?;
    if end < start {
        return Err(ModelReplyError::MissingJson);
    }

    let parsed: ModelRefinement = serde_json::from_str(&content[start..=end])?;
    let response = parsed.response.trim();
    if response.is_empty() {
        return Err(ModelReplyError::EmptyResponse);
    }

    let result = match parsed
        .refined_search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        Some(refined) => RefinementResult::refine(response, refined),
        None => RefinementResult::reply(response),
    };
    Ok(result.with_suggestions(parsed.suggestions))
}

pub struct RefinementService {
    llm_client: Arc<dyn LlmClient>,
    history_limit: usize,
}

impl RefinementService {
    pub fn new(llm_client: Arc<dyn LlmClient>, history_limit: usize) -> Self {
        Self {
            llm_client,
            history_limit,
        }
    }

    /// Never fails: any model problem demotes to the rule-based strategy.
    #[tracing::instrument(skip_all)]
    pub async fn refine(&self, input: &RefinementInput) -> RefinementResult {
        let attempt = self.attempt_model(input).await;
        resolve_refinement(attempt, input)
    }

    async fn attempt_model(&self, input: &RefinementInput) -> ModelAttempt {
        let messages = build_refine_messages(input, self.history_limit);

        let content = match self.llm_client.complete(&messages).await {
            Ok(content) => content,
            Err(e) => return ModelAttempt::Unavailable(e.to_string()),
        };

        match parse_model_refinement(&content) {
            Ok(result) => {
                tracing::debug!(
                    refines = result.refined_search.is_some(),
                    "Model refinement parsed"
                );
                ModelAttempt::Answered(result)
            }
            Err(e) => ModelAttempt::Unavailable(e.to_string()),
        }
    }
}
