use std::time::Duration;

use staygenie::presentation::config::{Environment, LlmProvider, Settings};

#[test]
fn given_environment_aliases_when_parsing_then_maps_to_variants() {
    let cases = [
        ("local", Environment::Local),
        ("Development", Environment::Local),
        ("test", Environment::Test),
        ("PROD", Environment::Prod),
        ("production", Environment::Prod),
    ];

    for (raw, expected) in cases {
        assert_eq!(Environment::try_from(raw.to_string()), Ok(expected));
    }
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environments_when_checking_error_details_then_only_local_exposes_them() {
    assert!(Environment::Local.exposes_error_details());
    assert!(!Environment::Test.exposes_error_details());
    assert!(!Environment::Prod.exposes_error_details());
}

#[test]
fn given_default_settings_when_reading_then_matches_service_defaults() {
    let settings = Settings::default();

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.llm.provider, LlmProvider::OpenAi);
    assert_eq!(settings.llm.chat_model, "gpt-4o-mini");
    assert_eq!(settings.chat.history_limit, 6);
    assert_eq!(settings.chat.hotel_context_limit, 10);
    assert_eq!(settings.conversation_ttl(), Duration::from_secs(60 * 60));
    assert_eq!(settings.sweep_interval(), Duration::from_secs(15 * 60));
    assert_eq!(settings.heartbeat_interval(), Duration::from_secs(15));
}

#[test]
fn given_provider_names_when_deserializing_then_accepts_lowercase_names() {
    let provider: LlmProvider = serde_json::from_str("\"lmstudio\"").unwrap();
    assert_eq!(provider, LlmProvider::LmStudio);

    let provider: LlmProvider = serde_json::from_str("\"azure\"").unwrap();
    assert_eq!(provider, LlmProvider::Azure);
}
