use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use super::Environment;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub chat: ChatSettings,
    pub conversation: ConversationSettings,
    pub hotel_data: HotelDataSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "lmstudio")]
    LmStudio,
    Azure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    pub azure_api_version: String,
    pub api_key: String,
    pub chat_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Prior turns forwarded to the model by the streaming search chat.
    pub history_limit: usize,
    /// Prior turns forwarded to the model by conversational refine.
    pub refine_history_limit: usize,
    pub hotel_context_limit: usize,
    pub heartbeat_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSettings {
    pub ttl_minutes: u64,
    pub sweep_interval_minutes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelDataSettings {
    pub base_url: String,
    pub api_key: String,
    pub details_timeout_seconds: u64,
    pub reviews_timeout_seconds: u64,
    pub ask_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAi,
            base_url: None,
            azure_endpoint: None,
            azure_api_version: "2024-06-01".to_string(),
            api_key: String::new(),
            chat_model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            temperature: 0.7,
            request_timeout_seconds: 60,
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            history_limit: 6,
            refine_history_limit: 4,
            hotel_context_limit: 10,
            heartbeat_seconds: 15,
        }
    }
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            ttl_minutes: 60,
            sweep_interval_minutes: 15,
        }
    }
}

impl Default for HotelDataSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.liteapi.travel/v3.0".to_string(),
            api_key: String::new(),
            details_timeout_seconds: 10,
            reviews_timeout_seconds: 15,
            ask_timeout_seconds: 30,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,staygenie=debug,tower_http=debug".to_string(),
            enable_json: false,
        }
    }
}

impl Settings {
    /// Layers built-in defaults, `appsettings.toml`, `appsettings.{env}.toml`,
    /// `APP__SECTION__KEY` variables and the provider credential variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&Settings::default())?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("appsettings").required(false))
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("environment", environment.as_str())?
            .set_override_option("llm.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .set_override_option("hotel_data.api_key", std::env::var("LITEAPI_KEY").ok())?
            .build()?
            .try_deserialize()
    }

    pub fn conversation_ttl(&self) -> Duration {
        Duration::from_secs(self.conversation.ttl_minutes * 60)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.conversation.sweep_interval_minutes * 60)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.chat.heartbeat_seconds.max(1))
    }
}
