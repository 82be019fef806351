use async_trait::async_trait;

use crate::domain::HotelReview;

#[async_trait]
pub trait HotelDataProvider: Send + Sync {
    async fn hotel_details(&self, hotel_id: &str) -> Result<serde_json::Value, HotelDataError>;

    async fn hotel_reviews(
        &self,
        hotel_id: &str,
        limit: u32,
    ) -> Result<Vec<HotelReview>, HotelDataError>;

    async fn ask_hotel(
        &self,
        hotel_id: &str,
        question: &str,
    ) -> Result<serde_json::Value, HotelDataError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HotelDataError {
    #[error("missing api credentials")]
    MissingCredentials,
    #[error("request timed out")]
    Timeout,
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("request failed: {0}")]
    Request(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
