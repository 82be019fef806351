use std::sync::Arc;

use staygenie::application::services::{
    ModelAttempt, ModelReplyError, RefinementInput, RefinementService, parse_model_refinement,
    resolve_refinement,
};
use staygenie::domain::{ChatMessage, MessageRole, RefinementResult, SearchContext};

use crate::helpers::ScriptedLlmClient;

const HISTORY_LIMIT: usize = 4;

fn rome_input(message: &str) -> RefinementInput {
    RefinementInput {
        user_message: message.to_string(),
        current_search: "hotels in Rome".to_string(),
        ..Default::default()
    }
}

#[test]
fn given_fenced_json_when_parsing_model_reply_then_extracts_refinement() {
    let content = "```json\n{\"response\":\"Done.\",\"refinedSearch\":\"hotels in Rome with spa\",\"suggestions\":[\"a\",\"\",\"b\",\"c\"]}\n```";

    let result = parse_model_refinement(content).unwrap();

    assert_eq!(result.response, "Done.");
    assert_eq!(
        result.refined_search.as_deref(),
        Some("hotels in Rome with spa")
    );
    assert_eq!(result.suggestions, vec!["a", "b"]);
}

#[test]
fn given_blank_refined_search_when_parsing_model_reply_then_treats_as_no_refinement() {
    let result =
        parse_model_refinement(r#"{"response":"Sure.","refinedSearch":"  ","suggestions":[]}"#)
            .unwrap();

    assert!(result.refined_search.is_none());
}

#[test]
fn given_prose_reply_when_parsing_model_reply_then_reports_missing_json() {
    let result = parse_model_refinement("I think you should look at cheaper hotels.");

    assert!(matches!(result, Err(ModelReplyError::MissingJson)));
}

#[test]
fn given_empty_response_field_when_parsing_model_reply_then_fails() {
    let result = parse_model_refinement(r#"{"response":"   "}"#);

    assert!(matches!(result, Err(ModelReplyError::EmptyResponse)));
}

#[test]
fn given_answered_attempt_when_resolving_then_keeps_model_result() {
    let answer = RefinementResult::reply("From the model");

    let result = resolve_refinement(ModelAttempt::Answered(answer.clone()), &rome_input("x"));

    assert_eq!(result, answer);
}

#[test]
fn given_unavailable_attempt_when_resolving_then_uses_rules() {
    let result = resolve_refinement(
        ModelAttempt::Unavailable("timeout".to_string()),
        &rome_input("under $120"),
    );

    assert_eq!(
        result.refined_search.as_deref(),
        Some("hotels in Rome under 120")
    );
}

#[tokio::test]
async fn given_failing_model_when_refining_then_falls_back_to_rules() {
    let llm = Arc::new(ScriptedLlmClient::failing());
    let service = RefinementService::new(llm.clone(), HISTORY_LIMIT);

    let result = service.refine(&rome_input("4 star hotels please")).await;

    assert_eq!(llm.calls(), 1);
    assert_eq!(
        result.refined_search.as_deref(),
        Some("hotels in Rome 4+ star rating")
    );
}

#[tokio::test]
async fn given_malformed_model_json_when_refining_then_falls_back_to_rules() {
    let llm = Arc::new(ScriptedLlmClient::replying("{\"response\": \"oops\""));
    let service = RefinementService::new(llm, HISTORY_LIMIT);

    let result = service.refine(&rome_input("near the beach")).await;

    assert_eq!(
        result.refined_search.as_deref(),
        Some("hotels in Rome near the beach")
    );
}

#[tokio::test]
async fn given_history_and_context_when_refining_then_prompt_includes_recent_turns_only() {
    let llm = Arc::new(ScriptedLlmClient::replying(
        r#"{"response":"Okay.","refinedSearch":null,"suggestions":[]}"#,
    ));
    let service = RefinementService::new(llm.clone(), HISTORY_LIMIT);
    let input = RefinementInput {
        search_context: Some(SearchContext {
            location: Some("Rome".to_string()),
            max_budget: Some(150.0),
            ..Default::default()
        }),
        chat_history: (0..6)
            .map(|i| ChatMessage::user(format!("turn {}", i)))
            .collect(),
        ..rome_input("what about Trastevere?")
    };

    let result = service.refine(&input).await;

    assert_eq!(result.response, "Okay.");
    let messages = llm.last_messages();
    assert_eq!(messages.len(), 1 + HISTORY_LIMIT + 1);
    assert_eq!(messages[0].role, MessageRole::System);
    assert!(messages[0].content.contains("Current search: \"hotels in Rome\""));
    assert!(messages[0].content.contains("Budget: up to $150 per night"));
    assert_eq!(messages[1].content, "turn 2");
    assert_eq!(messages.last().unwrap().content, "what about Trastevere?");
}
