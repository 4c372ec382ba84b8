//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and a Google Gemini implementation. Transport-agnostic;
//! used by the question handler to answer follow-up questions.

use anyhow::Result;
use async_trait::async_trait;
use prompt::ChatMessage;

mod config;
mod gemini;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use gemini::GeminiClient;

/// LLM client interface: request a completion from a list of messages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given messages (system/user/assistant).
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token_short_is_fully_hidden() {
        assert_eq!(mask_token(""), "***");
        assert_eq!(mask_token("abcdefghijk"), "***");
    }

    #[test]
    fn test_mask_token_long_keeps_head_and_tail() {
        assert_eq!(mask_token("AIzaSyD-1234567890-WXYZ"), "AIzaSyD***WXYZ");
    }

    #[test]
    fn test_mask_token_non_ascii_is_fully_hidden() {
        assert_eq!(mask_token("ключ-ключ-ключ-ключ"), "***");
    }
}
