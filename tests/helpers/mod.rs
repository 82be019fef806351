#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use staygenie::application::ports::{
    Clock, ConversationStore, HotelDataError, HotelDataProvider, LlmClient, LlmClientError,
    LlmTokenStream,
};
use staygenie::domain::{ChatEvent, ChatMessage, HotelReview};
use staygenie::infrastructure::persistence::InMemoryConversationStore;
use staygenie::presentation::{AppState, Environment, Settings, create_router};

/// Model double that replays canned output and records what it was sent.
#[derive(Default)]
pub struct ScriptedLlmClient {
    completion: Option<String>,
    tokens: Option<Vec<String>>,
    fail_mid_stream: bool,
    calls: AtomicUsize,
    last_messages: Mutex<Vec<ChatMessage>>,
}

impl ScriptedLlmClient {
    pub fn replying(completion: &str) -> Self {
        Self {
            completion: Some(completion.to_string()),
            ..Default::default()
        }
    }

    pub fn streaming(tokens: &[&str]) -> Self {
        Self {
            tokens: Some(tokens.iter().map(|t| t.to_string()).collect()),
            ..Default::default()
        }
    }

    /// Every call fails with `ApiRequestFailed`.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with_mid_stream_failure(mut self) -> Self {
        self.fail_mid_stream = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().unwrap().clone()
    }

    fn record(&self, messages: &[ChatMessage]) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmClientError> {
        self.record(messages);
        self.completion
            .clone()
            .ok_or_else(|| LlmClientError::ApiRequestFailed("scripted failure".to_string()))
    }

    async fn complete_stream(
        &self,
        messages: &[ChatMessage],
    ) -> Result<LlmTokenStream, LlmClientError> {
        self.record(messages);
        let tokens = self
            .tokens
            .clone()
            .ok_or_else(|| LlmClientError::ApiRequestFailed("scripted failure".to_string()))?;

        let mut items: Vec<Result<String, LlmClientError>> = tokens.into_iter().map(Ok).collect();
        if self.fail_mid_stream {
            items.push(Err(LlmClientError::ApiRequestFailed(
                "connection reset".to_string(),
            )));
        }
        Ok(Box::pin(futures::stream::iter(items)))
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
pub struct StubHotelData {
    reviews: Vec<HotelReview>,
    failure: Option<fn() -> HotelDataError>,
    last_limit: AtomicU32,
    calls: AtomicUsize,
}

impl StubHotelData {
    pub fn with_reviews(reviews: Vec<HotelReview>) -> Self {
        Self {
            reviews,
            ..Default::default()
        }
    }

    pub fn failing_with(failure: fn() -> HotelDataError) -> Self {
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    pub fn last_limit(&self) -> u32 {
        self.last_limit.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), HotelDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HotelDataProvider for StubHotelData {
    async fn hotel_details(&self, hotel_id: &str) -> Result<serde_json::Value, HotelDataError> {
        self.check()?;
        Ok(serde_json::json!({ "id": hotel_id, "name": "Hotel Artemide" }))
    }

    async fn hotel_reviews(
        &self,
        _hotel_id: &str,
        limit: u32,
    ) -> Result<Vec<HotelReview>, HotelDataError> {
        self.check()?;
        self.last_limit.store(limit, Ordering::SeqCst);
        Ok(self.reviews.iter().take(limit as usize).cloned().collect())
    }

    async fn ask_hotel(
        &self,
        hotel_id: &str,
        question: &str,
    ) -> Result<serde_json::Value, HotelDataError> {
        self.check()?;
        Ok(serde_json::json!({ "hotelId": hotel_id, "question": question, "answer": "Yes." }))
    }
}

pub fn test_settings() -> Settings {
    Settings {
        environment: Environment::Test,
        ..Settings::default()
    }
}

pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<dyn ConversationStore>,
}

pub fn create_test_app(
    llm_client: Arc<dyn LlmClient>,
    hotel_data: Arc<dyn HotelDataProvider>,
) -> TestApp {
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::default());
    let store: Arc<dyn ConversationStore> = Arc::new(InMemoryConversationStore::new(clock));
    let state = AppState::new(
        test_settings(),
        llm_client,
        Arc::clone(&store),
        hotel_data,
    );

    TestApp {
        router: create_router(state),
        store,
    }
}

pub fn review(headline: &str, pros: &str, score: f64, language: &str) -> HotelReview {
    HotelReview {
        name: Some("Guest".to_string()),
        headline: Some(headline.to_string()),
        pros: Some(pros.to_string()),
        average_score: Some(score),
        language: Some(language.to_string()),
        ..Default::default()
    }
}

/// Decodes the `data:` frames of an SSE body, skipping comments.
pub fn parse_sse_events(body: &str) -> Vec<ChatEvent> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| serde_json::from_str(data.trim()).unwrap())
        .collect()
}

pub fn percent_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}
