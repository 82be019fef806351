mod liteapi_client;

pub use liteapi_client::LiteApiClient;
