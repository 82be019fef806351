mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChatSettings, ConversationSettings, HotelDataSettings, LlmProvider, LlmSettings,
    LoggingSettings, ServerSettings, Settings,
};
