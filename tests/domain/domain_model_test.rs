use serde_json::json;

use staygenie::domain::{
    ChatEvent, ChatMessage, MessageRole, RefinementResult, SearchContext,
};

#[test]
fn given_chat_events_when_serializing_then_uses_tagged_camel_case_wire_format() {
    assert_eq!(
        serde_json::to_value(ChatEvent::Connected).unwrap(),
        json!({ "type": "connected" })
    );
    assert_eq!(
        serde_json::to_value(ChatEvent::Complete {
            full_response: "Sure!".to_string(),
            should_refine_search: true,
            refined_query: Some("beach hotels".to_string()),
        })
        .unwrap(),
        json!({
            "type": "complete",
            "fullResponse": "Sure!",
            "shouldRefineSearch": true,
            "refinedQuery": "beach hotels"
        })
    );
}

#[test]
fn given_client_message_without_timestamp_when_deserializing_then_accepts_it() {
    let message: ChatMessage =
        serde_json::from_value(json!({ "role": "assistant", "content": "Found 12 hotels." }))
            .unwrap();

    assert_eq!(message.role, MessageRole::Assistant);
    assert!(message.timestamp.is_none());
}

#[test]
fn given_legacy_date_keys_when_deserializing_search_context_then_accepts_aliases() {
    let context: SearchContext =
        serde_json::from_value(json!({ "checkin": "2025-06-01", "checkOut": "2025-06-04" }))
            .unwrap();

    assert_eq!(context.check_in.as_deref(), Some("2025-06-01"));
    assert_eq!(context.check_out.as_deref(), Some("2025-06-04"));
    assert!(!context.is_empty());
    assert!(SearchContext::default().is_empty());
}

#[test]
fn given_many_suggestions_when_building_refinement_then_keeps_two_non_blank() {
    let result = RefinementResult::refine("ok", "hotels").with_suggestions(["", "a", " ", "b", "c"]);

    assert_eq!(result.suggestions, vec!["a", "b"]);
}
