//! Wraps teloxide::Bot and implements [`scan_core::Bot`]. All text goes out with HTML parse mode.

use async_trait::async_trait;
use scan_core::{parse_message_id, Bot as CoreBot, Chat, Message, Result, ScanError};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, InputFile, MessageId, ParseMode};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn bot_err(e: impl std::fmt::Display) -> ScanError {
    ScanError::Bot(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.send_message_and_return_id(chat, text).await?;
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(bot_err)?;
        Ok(sent.id.to_string())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: &Chat,
        photo: Vec<u8>,
        file_name: &str,
        caption: Option<&str>,
    ) -> Result<()> {
        let file = InputFile::memory(photo).file_name(file_name.to_string());
        let mut request = self
            .bot
            .send_photo(ChatId(chat.id), file)
            .parse_mode(ParseMode::Html);
        if let Some(caption) = caption {
            request = request.caption(caption.to_string());
        }
        request.await.map_err(bot_err)?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(bot_err)?;
        let mut buf = Vec::new();
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(bot_err)?;
        debug!(file_id, bytes = buf.len(), "Downloaded file");
        Ok(buf)
    }
}
