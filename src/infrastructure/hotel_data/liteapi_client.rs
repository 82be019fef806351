use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::{Client, StatusCode};

use crate::application::ports::{HotelDataError, HotelDataProvider};
use crate::domain::HotelReview;
use crate::presentation::config::HotelDataSettings;

const API_KEY_HEADER: &str = "X-API-Key";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Hotel-data provider backed by the LiteAPI REST endpoints.
pub struct LiteApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    details_timeout: Duration,
    reviews_timeout: Duration,
    ask_timeout: Duration,
}

impl LiteApiClient {
    pub fn new(settings: &HotelDataSettings) -> Result<Self, HotelDataError> {
        let client = Client::builder()
            .build()
            .map_err(|e| HotelDataError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            details_timeout: Duration::from_secs(settings.details_timeout_seconds),
            reviews_timeout: Duration::from_secs(settings.reviews_timeout_seconds),
            ask_timeout: Duration::from_secs(settings.ask_timeout_seconds),
        })
    }

    async fn get_data(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<serde_json::Value, HotelDataError> {
        if self.api_key.trim().is_empty() {
            return Err(HotelDataError::MissingCredentials);
        }

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response, path).await?;

        let mut envelope: serde_json::Value =
            response.json().await.map_err(map_transport_error)?;

        match envelope.get_mut("data") {
            Some(data) => Ok(data.take()),
            None => Err(HotelDataError::InvalidResponse(
                "missing data envelope".to_string(),
            )),
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> HotelDataError {
    if error.is_timeout() {
        HotelDataError::Timeout
    } else if error.is_decode() {
        HotelDataError::InvalidResponse(error.to_string())
    } else {
        HotelDataError::Request(error.to_string())
    }
}

async fn check_status(
    response: reqwest::Response,
    path: &str,
) -> Result<reqwest::Response, HotelDataError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(HotelDataError::NotFound(path.to_string())),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after)
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            Err(HotelDataError::RateLimited { retry_after_secs })
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Err(HotelDataError::Timeout),
        _ => {
            let message = response.text().await.unwrap_or_default();
            Err(HotelDataError::Upstream {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn parse_retry_after(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

#[async_trait]
impl HotelDataProvider for LiteApiClient {
    async fn hotel_details(&self, hotel_id: &str) -> Result<serde_json::Value, HotelDataError> {
        self.get_data(
            "/data/hotel",
            &[("hotelId", hotel_id.to_string())],
            self.details_timeout,
        )
        .await
    }

    async fn hotel_reviews(
        &self,
        hotel_id: &str,
        limit: u32,
    ) -> Result<Vec<HotelReview>, HotelDataError> {
        let data = self
            .get_data(
                "/data/reviews",
                &[
                    ("hotelId", hotel_id.to_string()),
                    ("limit", limit.to_string()),
                    ("timeout", self.reviews_timeout.as_secs().to_string()),
                ],
                self.reviews_timeout,
            )
            .await?;

        if data.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(data).map_err(|e| HotelDataError::InvalidResponse(e.to_string()))
    }

    async fn ask_hotel(
        &self,
        hotel_id: &str,
        question: &str,
    ) -> Result<serde_json::Value, HotelDataError> {
        self.get_data(
            "/data/hotel/ask",
            &[
                ("hotelId", hotel_id.to_string()),
                ("query", question.to_string()),
            ],
            self.ask_timeout,
        )
        .await
    }
}
