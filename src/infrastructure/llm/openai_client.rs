use std::time::Duration;

use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError, LlmTokenStream};
use crate::domain::ChatMessage;
use crate::presentation::config::{LlmProvider, LlmSettings};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Chat-completions client for OpenAI and API-compatible providers.
pub struct OpenAiClient {
    client: Client,
    provider: LlmProvider,
    base_url: String,
    api_version: Option<String>,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    request_timeout: Duration,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_options: Option<StreamOptions>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct StreamOptions {
    include_usage: bool,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum StreamLine {
    Token(String),
    Done,
    Skip,
}

fn parse_stream_line(line: &str) -> StreamLine {
    let Some(data) = line.trim().strip_prefix("data:") else {
        return StreamLine::Skip;
    };
    let data = data.trim();
    if data == "[DONE]" {
        return StreamLine::Done;
    }
    serde_json::from_str::<ChatCompletionChunk>(data)
        .ok()
        .and_then(|chunk| chunk.choices.into_iter().next())
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty())
        .map(StreamLine::Token)
        .unwrap_or(StreamLine::Skip)
}

impl OpenAiClient {
    fn wire_messages<'a>(&self, messages: &'a [ChatMessage]) -> Vec<WireMessage<'a>> {
        messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect()
    }

    fn completions_request(&self, body: &ChatCompletionRequest<'_>) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(body);
        if let Some(version) = &self.api_version {
            request = request.query(&[("api-version", version)]);
        }
        if self.provider == LlmProvider::Azure {
            request.header("api-key", &self.api_key)
        } else {
            request.bearer_auth(&self.api_key)
        }
    }

    fn ensure_credentials(&self) -> Result<(), LlmClientError> {
        if self.provider != LlmProvider::LmStudio && self.api_key.trim().is_empty() {
            return Err(LlmClientError::MissingCredentials);
        }
        Ok(())
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, LlmClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmClientError> {
        self.ensure_credentials()?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: self.wire_messages(messages),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: None,
            stream_options: None,
        };

        let request = self.completions_request(&body).timeout(self.request_timeout);
        let response = self.send(request).await?;

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))
    }

    async fn complete_stream(
        &self,
        messages: &[ChatMessage],
    ) -> Result<LlmTokenStream, LlmClientError> {
        self.ensure_credentials()?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: self.wire_messages(messages),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: Some(true),
            stream_options: Some(StreamOptions {
                include_usage: true,
            }),
        };

        let response = self.send(self.completions_request(&body)).await?;
        let mut bytes = response.bytes_stream();

        // SSE lines can be split across network chunks, so buffer until newline.
        let token_stream = async_stream::try_stream! {
            let mut buffer: Vec<u8> = Vec::new();
            let mut finished = false;

            while let Some(chunk) = bytes.next().await {
                let chunk = chunk.map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;
                buffer.extend_from_slice(&chunk);

                while let Some(newline) = buffer.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = buffer.drain(..=newline).collect();
                    match parse_stream_line(&String::from_utf8_lossy(&line)) {
                        StreamLine::Token(token) => {
                            yield token;
                        }
                        StreamLine::Done => {
                            finished = true;
                            break;
                        }
                        StreamLine::Skip => {}
                    }
                }
                if finished {
                    break;
                }
            }

            if !finished {
                if let StreamLine::Token(token) = parse_stream_line(&String::from_utf8_lossy(&buffer)) {
                    yield token;
                }
            }
        };

        Ok(Box::pin(token_stream))
    }
}

pub fn create_llm_client(settings: &LlmSettings) -> Result<OpenAiClient, LlmClientError> {
    let (base_url, api_version) = match settings.provider {
        LlmProvider::OpenAi => (
            settings
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            None,
        ),
        LlmProvider::LmStudio => (
            settings
                .base_url
                .clone()
                .ok_or_else(|| {
                    LlmClientError::InvalidResponse(
                        "base_url required for lmstudio provider".to_string(),
                    )
                })?
                .trim_end_matches('/')
                .to_string(),
            None,
        ),
        LlmProvider::Azure => {
            let endpoint = settings.azure_endpoint.as_ref().ok_or_else(|| {
                LlmClientError::InvalidResponse(
                    "azure_endpoint required for azure provider".to_string(),
                )
            })?;
            (
                format!(
                    "{}/openai/deployments/{}",
                    endpoint.trim_end_matches('/'),
                    settings.chat_model
                ),
                Some(settings.azure_api_version.clone()),
            )
        }
    };

    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

    Ok(OpenAiClient {
        client,
        provider: settings.provider,
        base_url,
        api_version,
        api_key: settings.api_key.clone(),
        model: settings.chat_model.clone(),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
        request_timeout: Duration::from_secs(settings.request_timeout_seconds),
    })
}
