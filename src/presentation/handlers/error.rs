use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{HeaderValue, StatusCode, header::RETRY_AFTER};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::HotelDataError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        conversation_id: Option<String>,
    },
    #[error(transparent)]
    HotelData(#[from] HotelDataError),
    #[error("{message}")]
    Internal {
        message: String,
        details: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            conversation_id: None,
            retry_after: None,
            details: None,
        }
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            conversation_id: None,
        }
    }

    pub fn validation_for(message: impl Into<String>, conversation_id: Option<String>) -> Self {
        Self::Validation {
            message: message.into(),
            conversation_id,
        }
    }

    /// `details` is only surfaced when the caller passes it, which handlers do
    /// for the local environment.
    pub fn internal(message: impl Into<String>, details: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::HotelData(e) => match e {
                HotelDataError::Timeout => StatusCode::REQUEST_TIMEOUT,
                HotelDataError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                HotelDataError::NotFound(_) => StatusCode::NOT_FOUND,
                HotelDataError::MissingCredentials => StatusCode::SERVICE_UNAVAILABLE,
                HotelDataError::Upstream { .. }
                | HotelDataError::Request(_)
                | HotelDataError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            },
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn hotel_data_message(error: &HotelDataError) -> &'static str {
    match error {
        HotelDataError::Timeout => "Hotel data request timed out",
        HotelDataError::RateLimited { .. } => "Too many requests, please retry later",
        HotelDataError::NotFound(_) => "Hotel not found",
        HotelDataError::MissingCredentials => "Hotel data service is not configured",
        HotelDataError::Upstream { .. }
        | HotelDataError::Request(_)
        | HotelDataError::InvalidResponse(_) => "Hotel data service failed",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::Validation {
                message,
                conversation_id,
            } => {
                tracing::warn!(error = %message, "Request rejected");
                ErrorBody {
                    conversation_id,
                    ..ErrorBody::new(message)
                }
            }
            ApiError::HotelData(error) => {
                tracing::error!(error = %error, status = status.as_u16(), "Hotel data request failed");
                let retry_after = match &error {
                    HotelDataError::RateLimited { retry_after_secs } => Some(*retry_after_secs),
                    _ => None,
                };
                ErrorBody {
                    retry_after,
                    ..ErrorBody::new(hotel_data_message(&error))
                }
            }
            ApiError::Internal { message, details } => {
                tracing::error!(error = %message, "Request failed");
                ErrorBody {
                    details,
                    ..ErrorBody::new(message)
                }
            }
        };

        let retry_after = body.retry_after;
        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}
