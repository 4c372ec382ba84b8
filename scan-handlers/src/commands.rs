//! `/start` and `/help`.

use std::sync::Arc;

use async_trait::async_trait;
use scan_core::{Bot, Handler, HandlerResponse, Message, MessageKind, Result};
use teloxide::utils::html;
use tracing::{debug, info, instrument};

/// Answers bot commands. Unknown commands, and commands addressed to another bot
/// (`/start@otherbot`), end the chain without a reply.
pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    /// Own username, filled from get_me at startup. `None` accepts any `@botname` suffix.
    bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
}

impl CommandHandler {
    pub fn new(bot: Arc<dyn Bot>, bot_username: Arc<tokio::sync::RwLock<Option<String>>>) -> Self {
        Self { bot, bot_username }
    }

    /// Welcome text for `/start`, greeting the user by first name.
    pub fn welcome_text(message: &Message) -> String {
        format!(
            "👋 Hello, {}!\n\nI am the Brain Tumor Detection Bot. Please send me a brain scan image, and I will analyze it for potential tumor types.",
            html::escape(message.user.display_name())
        )
    }

    pub fn help_text() -> String {
        format!(
            "{}\n1. {} Send me a brain scan image (like an MRI).\n2. {} After I provide the analysis, you can ask me questions about the detected tumor types for informational purposes.",
            html::bold("How to use me:"),
            html::bold("Analysis:"),
            html::bold("Follow-up:")
        )
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != MessageKind::Command {
            return Ok(HandlerResponse::Continue);
        }
        let bot_username = self.bot_username.read().await.clone();
        if !message.is_command_for(bot_username.as_deref()) {
            debug!(
                target_bot = message.command_target().unwrap_or_default(),
                "Command addressed to another bot, ignoring"
            );
            return Ok(HandlerResponse::Stop);
        }
        let Some(command) = message.command() else {
            return Ok(HandlerResponse::Stop);
        };

        let text = match command.as_str() {
            "start" => Self::welcome_text(message),
            "help" => Self::help_text(),
            other => {
                debug!(command = %other, "Unknown command, ignoring");
                return Ok(HandlerResponse::Stop);
            }
        };

        self.bot.reply_to(message, &text).await?;
        info!(user_id = message.user.id, command = %command, "Command answered");
        Ok(HandlerResponse::Reply(text))
    }
}
