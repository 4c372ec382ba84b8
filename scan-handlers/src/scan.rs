//! Image messages: download, detect, annotate, reply.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use scan_core::{Bot, Handler, HandlerError, HandlerResponse, Message, MessageKind, Result};
use tracing::{error, info, instrument};
use tumor_detector::ScanAnalyzer;

use crate::findings::Findings;
use crate::session::SessionStore;
use crate::text::{truncate_html, MAX_CAPTION_LEN};

pub const ANALYZING_MESSAGE: &str = "Scan received. Analyzing... 🩺";
pub const ANALYSIS_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error during the analysis. Please try sending the scan again.";
pub const ANNOTATED_FILE_NAME: &str = "annotated_scan.jpeg";

/// Analyzes photos and image documents and replies with the annotated scan.
pub struct ScanHandler {
    bot: Arc<dyn Bot>,
    analyzer: ScanAnalyzer,
    sessions: SessionStore,
}

impl ScanHandler {
    pub fn new(bot: Arc<dyn Bot>, analyzer: ScanAnalyzer, sessions: SessionStore) -> Self {
        Self {
            bot,
            analyzer,
            sessions,
        }
    }

    async fn process(&self, message: &Message) -> anyhow::Result<String> {
        self.bot.send_message(&message.chat, ANALYZING_MESSAGE).await?;

        let file_id = message
            .image_file_id
            .as_deref()
            .ok_or(HandlerError::NoImage)?;
        let bytes = self.bot.download_file(file_id).await?;

        let analyzer = self.analyzer.clone();
        let analysis = tokio::task::spawn_blocking(move || analyzer.analyze(&bytes))
            .await
            .context("Scan analysis task panicked")??;

        let findings = Findings::from_detections(&analysis.detections);
        self.sessions
            .set_last_findings(message.user.id, findings.chatbot_context())
            .await;

        let caption = truncate_html(&findings.caption_html(), MAX_CAPTION_LEN);
        self.bot
            .send_photo(
                &message.chat,
                analysis.annotated_jpeg,
                ANNOTATED_FILE_NAME,
                Some(&caption),
            )
            .await?;

        info!(
            user_id = message.user.id,
            "Processed scan for chat {}. Found: {}",
            message.chat.id,
            findings.log_summary()
        );
        Ok(caption)
    }
}

#[async_trait]
impl Handler for ScanHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != MessageKind::Image {
            return Ok(HandlerResponse::Continue);
        }

        match self.process(message).await {
            Ok(caption) => Ok(HandlerResponse::Reply(caption)),
            Err(e) => {
                error!(
                    chat_id = message.chat.id,
                    error = ?e,
                    "Error processing image for chat {}",
                    message.chat.id
                );
                self.bot.reply_to(message, ANALYSIS_ERROR_MESSAGE).await?;
                Ok(HandlerResponse::Reply(ANALYSIS_ERROR_MESSAGE.to_string()))
            }
        }
    }
}
