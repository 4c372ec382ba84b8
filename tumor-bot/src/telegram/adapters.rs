//! Conversions from teloxide types to core types.

use scan_core::{Chat, Message, MessageKind, ToCoreMessage, ToCoreUser, User};

/// Telegram user to core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Telegram message to core message. Photos and image documents become [`MessageKind::Image`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        let image_file_id = self.image_file_id();
        let text = msg.text();

        Message {
            id: msg.id.to_string(),
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: msg.chat.id.0,
                chat_type: format!("{:?}", msg.chat.kind),
            },
            content: text.or(msg.caption()).unwrap_or("").to_string(),
            kind: classify(text, image_file_id.is_some()),
            image_file_id,
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    /// Largest photo size, else a document with an `image/*` MIME type.
    fn image_file_id(&self) -> Option<String> {
        if let Some(sizes) = self.0.photo() {
            return sizes
                .iter()
                .max_by_key(|p| p.width * p.height)
                .map(|p| p.file.id.0.clone());
        }
        self.0
            .document()
            .filter(|doc| {
                doc.mime_type
                    .as_ref()
                    .is_some_and(|m| m.essence_str().starts_with("image/"))
            })
            .map(|doc| doc.file.id.0.clone())
    }
}

/// Decides the message kind from its text and whether it carries an image.
pub fn classify(text: Option<&str>, has_image: bool) -> MessageKind {
    if has_image {
        return MessageKind::Image;
    }
    match text.map(str::trim) {
        Some(t) if t.starts_with('/') => MessageKind::Command,
        Some(t) if !t.is_empty() => MessageKind::Text,
        _ => MessageKind::Other,
    }
}
