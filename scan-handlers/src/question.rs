//! Follow-up questions answered by the LLM.

use std::sync::Arc;

use async_trait::async_trait;
use gemini_client::LlmClient;
use scan_core::{Bot, Handler, HandlerResponse, Message, MessageKind, Result};
use teloxide::utils::html;
use tracing::{error, info, instrument};

use crate::session::SessionStore;
use crate::text::{disclaimer_html, telegram_len, truncate_html, MAX_MESSAGE_LEN};

pub const THINKING_MESSAGE: &str = "Consulting knowledge base... 🧠";
pub const LLM_ERROR_MESSAGE: &str =
    "I'm having trouble accessing my knowledge base right now. Please try again later.";

/// Sends a placeholder, asks the LLM with the user's last findings as context, then edits the
/// placeholder with the answer and the disclaimer.
pub struct QuestionHandler {
    bot: Arc<dyn Bot>,
    llm: Arc<dyn LlmClient>,
    sessions: SessionStore,
}

impl QuestionHandler {
    pub fn new(bot: Arc<dyn Bot>, llm: Arc<dyn LlmClient>, sessions: SessionStore) -> Self {
        Self { bot, llm, sessions }
    }

    /// Escaped answer cut to fit one message together with the disclaimer.
    fn compose(answer: &str) -> String {
        let disclaimer = disclaimer_html();
        let budget = MAX_MESSAGE_LEN.saturating_sub(telegram_len(&disclaimer));
        format!("{}{}", truncate_html(&html::escape(answer), budget), disclaimer)
    }
}

#[async_trait]
impl Handler for QuestionHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != MessageKind::Text {
            return Ok(HandlerResponse::Continue);
        }
        let question = message.content.trim();
        if question.is_empty() {
            return Ok(HandlerResponse::Ignore);
        }

        let thinking_id = self
            .bot
            .send_message_and_return_id(&message.chat, THINKING_MESSAGE)
            .await?;

        let last_findings = self.sessions.last_findings(message.user.id).await;
        let messages = prompt::question_messages(question, last_findings.as_deref());

        let text = match self.llm.get_llm_response_with_messages(messages).await {
            Ok(answer) => {
                info!(
                    user_id = message.user.id,
                    answer_len = answer.len(),
                    "Answered text query for chat {}.",
                    message.chat.id
                );
                Self::compose(&answer)
            }
            Err(e) => {
                error!(
                    chat_id = message.chat.id,
                    error = ?e,
                    "Error calling LLM for chat {}",
                    message.chat.id
                );
                format!("{}{}", LLM_ERROR_MESSAGE, disclaimer_html())
            }
        };

        self.bot
            .edit_message(&message.chat, &thinking_id, &text)
            .await?;
        Ok(HandlerResponse::Reply(text))
    }
}
