//! Shared mocks for handler tests: a recording Bot, a canned Detector and a canned LLM.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gemini_client::LlmClient;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use prompt::ChatMessage;
use scan_core::{Bot, Chat, Message, MessageKind, Result, ScanError, User};
use tumor_detector::{BoundingBox, Detection, Detector};

/// One outgoing call seen by [`MockBot`].
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Message { chat_id: i64, text: String },
    Reply { message_id: String, text: String },
    Edit { message_id: String, text: String },
    Photo { chat_id: i64, file_name: String, caption: Option<String>, len: usize },
}

/// Records every call; serves `file` for any download.
pub struct MockBot {
    pub sent: Mutex<Vec<Sent>>,
    pub file: Option<Vec<u8>>,
}

impl MockBot {
    pub fn new(file: Option<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            file,
        })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn push(&self, s: Sent) {
        self.sent.lock().unwrap().push(s);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.push(Sent::Message { chat_id: chat.id, text: text.to_string() });
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.push(Sent::Reply { message_id: message.id.clone(), text: text.to_string() });
        Ok(())
    }

    async fn edit_message(&self, _chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.push(Sent::Edit { message_id: message_id.to_string(), text: text.to_string() });
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        self.push(Sent::Message { chat_id: chat.id, text: text.to_string() });
        Ok("900".to_string())
    }

    async fn send_photo(
        &self,
        chat: &Chat,
        photo: Vec<u8>,
        file_name: &str,
        caption: Option<&str>,
    ) -> Result<()> {
        self.push(Sent::Photo {
            chat_id: chat.id,
            file_name: file_name.to_string(),
            caption: caption.map(String::from),
            len: photo.len(),
        });
        Ok(())
    }

    async fn download_file(&self, _file_id: &str) -> Result<Vec<u8>> {
        self.file
            .clone()
            .ok_or_else(|| ScanError::Bot("file not found".to_string()))
    }
}

/// Returns fixed detections.
pub struct MockDetector(pub Vec<Detection>);

impl Detector for MockDetector {
    fn detect(&self, _image: &DynamicImage) -> anyhow::Result<Vec<Detection>> {
        Ok(self.0.clone())
    }
}

/// Returns a fixed answer (or error) and records the prompts it was given.
pub struct MockLlm {
    pub answer: std::result::Result<String, String>,
    pub prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlm {
    pub fn ok(answer: &str) -> Arc<Self> {
        Arc::new(Self { answer: Ok(answer.to_string()), prompts: Mutex::new(Vec::new()) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { answer: Err("quota exceeded".to_string()), prompts: Mutex::new(Vec::new()) })
    }

    pub fn last_prompt(&self) -> String {
        let prompts = self.prompts.lock().unwrap();
        prompts.last().unwrap()[0].content.clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(messages);
        self.answer.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

pub fn detection(class_id: usize) -> Detection {
    Detection {
        class_id,
        confidence: 0.9,
        bbox: BoundingBox { x1: 4.0, y1: 4.0, x2: 20.0, y2: 20.0 },
    }
}

pub fn png_bytes() -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([60, 60, 60])))
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

pub fn message(user_id: i64, content: &str, kind: MessageKind) -> Message {
    Message {
        id: "42".to_string(),
        user: User {
            id: user_id,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 1000 + user_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        kind,
        image_file_id: if kind == MessageKind::Image {
            Some("file-1".to_string())
        } else {
            None
        },
    }
}
