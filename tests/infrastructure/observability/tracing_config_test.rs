use staygenie::infrastructure::observability::TracingConfig;
use staygenie::presentation::config::{Environment, LoggingSettings};

#[test]
fn given_logging_settings_when_building_tracing_config_then_uses_them() {
    let logging = LoggingSettings {
        level: "warn".to_string(),
        enable_json: true,
    };

    let config = TracingConfig::from_settings(Environment::Prod, &logging);

    assert_eq!(config.environment, Environment::Prod);
    assert!(config.json_format);
    assert_eq!(config.directives, "warn");
}

#[test]
fn given_blank_level_when_building_tracing_config_then_falls_back_to_defaults() {
    let logging = LoggingSettings {
        level: "  ".to_string(),
        enable_json: false,
    };

    let config = TracingConfig::from_settings(Environment::Local, &logging);

    assert!(config.directives.contains("staygenie=debug"));
}
