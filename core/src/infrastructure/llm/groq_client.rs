use std::fmt;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    recommendation::ports::LLMClient,
};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const SYSTEM_PROMPT: &str = "You are a professional dietary catering consultant. Provide menu recommendations in the following format:

1. Nutritional Goals
- Daily calories
- Protein
- Carbs
- Fat

2. Menu Recommendations
Breakfast:
- [Name of dish] (calories)
Brief description focusing on key ingredients and benefits

Lunch:
- [Name of dish] (calories)
Brief description focusing on key ingredients and benefits

Dinner:
- [Name of dish] (calories)
Brief description focusing on key ingredients and benefits

3. Health Advice
Please provide health advice in clear bullet points:
• Daily nutrition targets
• Exercise recommendations
• Hydration guidelines
• General wellness tips

Keep descriptions concise and focused on what the customer needs to know.";

/// OpenAI-compatible chat completions client (Groq by default).
///
/// Makes a single attempt per call; retry policy belongs to the caller.
/// Transport failures, 429 and 5xx map to `RecommendationServiceUnavailable`,
/// everything else to `RecommendationRequestFailed`.
#[derive(Clone)]
pub struct GroqLLMClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

impl fmt::Debug for GroqLLMClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqLLMClient")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
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

impl GroqLLMClient {
    pub fn new(config: LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                error!("Failed to build completion HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            client,
            api_key: config.api_key,
            model: config.model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
        })
    }

    async fn call_chat_completions(&self, prompt: &str) -> Result<String, CoreError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the URL only, never headers.
                error!("Completion request failed: {}", e);
                CoreError::RecommendationServiceUnavailable(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(200).collect();
            error!("Completion API error: {} - {}", status, body);
            let message = format!("completion API returned {}", status);
            return Err(
                if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                    CoreError::RecommendationServiceUnavailable(message)
                } else {
                    CoreError::RecommendationRequestFailed(message)
                },
            );
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse completion response: {}", e);
            CoreError::RecommendationRequestFailed(format!("malformed response: {}", e))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| CoreError::RecommendationRequestFailed("empty completion".to_string()))?;

        debug!(chars = content.len(), "completion received");
        Ok(content)
    }
}

impl LLMClient for GroqLLMClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete(&self, prompt: String) -> Result<String, CoreError> {
        self.call_chat_completions(&prompt).await
    }
}
