//! reqwest implementation of [`MoodAnalyzer`](crate::MoodAnalyzer) against an
//! OpenAI-compatible chat-completions endpoint.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::analysis::{SYSTEM_PROMPT, TextMoodAnalysis, build_analysis_prompt};
use crate::config::Config;
use crate::observability;
use crate::retry::RetryPolicy;
use crate::{MoodAnalyzer, WellnessError};

const MAX_TOKENS: u32 = 600;
const TEMPERATURE: f32 = 0.4;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Mood analyzer backed by a hosted chat model.
#[derive(Clone, Debug)]
pub struct ReqwestMoodAnalyzer {
    base_url: String,
    model: String,
    api_key: SecretString,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl ReqwestMoodAnalyzer {
    pub fn new(config: &Config) -> Result<Self, WellnessError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            client,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn request_once(&self, prompt: &str) -> Result<TextMoodAnalysis, WellnessError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let resp = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        let completion: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| WellnessError::Decode(e.to_string()))?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| WellnessError::Decode("response has no message content".into()))?;

        let analysis: TextMoodAnalysis = serde_json::from_str(content.trim())
            .map_err(|e| WellnessError::Decode(format!("analysis is not valid JSON: {e}")))?;
        analysis.validated()
    }
}

async fn error_from_response(resp: reqwest::Response) -> WellnessError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    let snippet: String = message.chars().take(256).collect();

    match status {
        401 | 403 => WellnessError::Auth(snippet),
        429 => WellnessError::RateLimited(snippet),
        _ => WellnessError::Api {
            status,
            message: snippet,
        },
    }
}

#[async_trait]
impl MoodAnalyzer for ReqwestMoodAnalyzer {
    async fn analyze_mood_text(&self, text: &str) -> Result<TextMoodAnalysis, WellnessError> {
        if text.trim().is_empty() {
            return Err(WellnessError::InvalidInput(
                "mood description is empty".into(),
            ));
        }
        let prompt = build_analysis_prompt(text);
        let result = self
            .retry
            .retry_async_if(|| self.request_once(&prompt), WellnessError::is_retryable)
            .await;

        match &result {
            Ok(analysis) => {
                observability::record_analysis("ok");
                tracing::debug!(
                    sentiment = analysis.sentiment_score,
                    keywords = analysis.emotional_keywords.len(),
                    "mood text analyzed"
                );
            }
            Err(e) => {
                observability::record_analysis("error");
                tracing::warn!(error = %e, "mood text analysis failed");
            }
        }
        result
    }
}
