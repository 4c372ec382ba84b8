//! Bot abstraction for sending, editing and downloading.
//!
//! [`Bot`] is transport-agnostic; tumor-bot implements it on top of teloxide. All text is sent as
//! Telegram HTML, so callers escape any user- or model-provided content before passing it in.

use crate::error::{Result, ScanError};
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction for the messaging transport used by handlers.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends an HTML text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Edits an already-sent message. `message_id` is transport-specific (Telegram numeric string).
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Sends a message and returns its id for a later `edit_message`.
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;
    /// Uploads an in-memory image with an optional HTML caption.
    async fn send_photo(
        &self,
        chat: &Chat,
        photo: Vec<u8>,
        file_name: &str,
        caption: Option<&str>,
    ) -> Result<()>;
    /// Downloads a file previously sent by a user, by transport file id.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;
}

/// Parses a message id string into an i32. Used by edit_message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| ScanError::Bot(format!("Invalid message_id for edit: {}", s)))
}
