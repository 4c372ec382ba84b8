//! Gemini implementation of [`LlmClient`]: `models/{model}:generateContent` over REST.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use prompt::{ChatMessage, MessageRole};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::{mask_token, LlmClient, LlmConfig, DEFAULT_MODEL};

/// Gemini REST client. Cheap to clone; the underlying reqwest client is shared.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Builds a client with a custom base URL (e.g. a proxy or a mock server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Builds a client from config, applying its request timeout.
    pub fn from_config(config: &dyn LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()
            .context("Failed to build HTTP client for Gemini")?;
        Ok(Self {
            http,
            api_key: config.api_key().to_string(),
            base_url: config.base_url().to_string(),
            model: config.model().to_string(),
        })
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = GenerateContentRequest::from_messages(&messages);
        if request.contents.is_empty() {
            anyhow::bail!("No user or assistant messages to send to Gemini");
        }

        info!(
            message_count = messages.len(),
            api_key = %mask_token(&self.api_key),
            "Gemini generateContent request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            anyhow::bail!("Gemini API returned {}: {}", status, detail);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        if let Some(ref u) = body.usage_metadata {
            info!(
                prompt_tokens = ?u.prompt_token_count,
                completion_tokens = ?u.candidates_token_count,
                total_tokens = ?u.total_token_count,
                "Gemini generateContent usage"
            );
        }

        body.into_text()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

impl GenerateContentRequest {
    /// System messages are merged into `systemInstruction`; the rest keep their order.
    fn from_messages(messages: &[ChatMessage]) -> Self {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();
        for msg in messages {
            let part = Part {
                text: Some(msg.content.clone()),
            };
            match msg.role {
                MessageRole::System => system_parts.push(part),
                MessageRole::User => contents.push(Content {
                    role: Some("user".to_string()),
                    parts: vec![part],
                }),
                MessageRole::Assistant => contents.push(Content {
                    role: Some("model".to_string()),
                    parts: vec![part],
                }),
            }
        }
        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(Content {
                role: None,
                parts: system_parts,
            })
        };
        Self {
            contents,
            system_instruction,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Result<String> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            match block_reason {
                Some(reason) => anyhow::bail!("Gemini blocked the prompt: {}", reason),
                None => anyhow::bail!("No response from Gemini"),
            }
        };
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            warn!(finish_reason = ?candidate.finish_reason, "Gemini returned an empty candidate");
            anyhow::bail!(
                "Empty response from Gemini (finish_reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            );
        }
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
