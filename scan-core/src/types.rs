//! Core types: user, chat, message, handler response, and Handler trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// First name when known, otherwise username, otherwise "there".
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("there")
    }
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// What an incoming message carries, decided once by the transport adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Plain text that is not a bot command.
    Text,
    /// Text starting with `/`.
    Command,
    /// A photo, or a document whose MIME type is `image/*`.
    Image,
    /// Anything else (stickers, voice, ...).
    Other,
}

/// A single message with user, chat, content, and optional image attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Message text, or the caption for images.
    pub content: String,
    pub kind: MessageKind,
    /// Transport file id of the largest photo size (or the image document).
    pub image_file_id: Option<String>,
}

impl Message {
    /// Command name without the leading `/` and any `@botname` suffix, lower-cased.
    pub fn command(&self) -> Option<String> {
        if self.kind != MessageKind::Command {
            return None;
        }
        let first = self.content.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        if name.is_empty() {
            None
        } else {
            Some(name.to_lowercase())
        }
    }

    /// The `@botname` suffix of a command, when the sender addressed a specific bot.
    pub fn command_target(&self) -> Option<&str> {
        if self.kind != MessageKind::Command {
            return None;
        }
        let first = self.content.split_whitespace().next()?;
        let (_, target) = first.split_once('@')?;
        (!target.is_empty()).then_some(target)
    }

    /// True unless the command names a different bot than `bot_username`.
    /// An unknown own username accepts every command.
    pub fn is_command_for(&self, bot_username: Option<&str>) -> bool {
        match (self.command_target(), bot_username) {
            (Some(target), Some(own)) => target.eq_ignore_ascii_case(own.trim_start_matches('@')),
            _ => true,
        }
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
