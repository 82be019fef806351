mod conversation_sweeper;
mod prompt_builder;
mod refine_marker;
mod refinement_service;
mod review_filter;
mod rule_based_refiner;
mod search_chat_service;

pub use conversation_sweeper::ConversationSweeper;
pub use prompt_builder::{build_refine_messages, build_search_chat_messages, recent_history};
pub use refine_marker::{ExtractedReply, extract_refine_marker};
pub use refinement_service::{
    ModelAttempt, ModelReplyError, RefinementInput, RefinementService, parse_model_refinement,
    resolve_refinement,
};
pub use review_filter::{
    GENERIC_REVIEW_MIN_CHARS, ReviewDigest, ReviewFilter, classify_sentiment, digest_reviews,
    is_generic,
};
pub use rule_based_refiner::{
    RULES, Rule, RuleCategory, RuleInput, RuleOutcome, evaluate_rules, refine_with_rules,
};
pub use search_chat_service::{SearchChatRequest, SearchChatService};
