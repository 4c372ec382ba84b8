//! Component factory: builds the detector, LLM client and handler chain from config.

use std::sync::Arc;

use anyhow::Result;
use gemini_client::{mask_token, GeminiClient, LlmClient, LlmConfig};
use handler_chain::HandlerChain;
use scan_core::Bot as CoreBot;
use scan_handlers::{
    AuthHandler, CommandHandler, LoggingHandler, QuestionHandler, ScanHandler, SessionStore,
};
use teloxide::prelude::*;
use tracing::{error, info, instrument};
use tumor_detector::{ScanAnalyzer, YoloDetector};

use crate::config::BotConfig;
use crate::telegram::TelegramBotAdapter;

/// Dependencies the handlers share.
#[derive(Clone)]
pub struct BotComponents {
    pub handler_bot: Arc<dyn CoreBot>,
    pub analyzer: ScanAnalyzer,
    pub llm: Arc<dyn LlmClient>,
    pub sessions: SessionStore,
    pub allowed_user_ids: Vec<i64>,
    /// Filled by the REPL from get_me; read by the command handler.
    pub bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
}

/// Creates the teloxide Bot, honoring a custom API URL when configured.
pub fn build_teloxide_bot(config: &BotConfig) -> Bot {
    let bot = Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Loads the model and configures Gemini. Either failing aborts startup.
#[instrument(skip(config, teloxide_bot))]
pub fn build_bot_components(config: &BotConfig, teloxide_bot: Bot) -> Result<BotComponents> {
    let detector = YoloDetector::load(
        &config.detection.model_path,
        config.detection.detector_config(),
    )?;
    let analyzer = ScanAnalyzer::new(Arc::new(detector));

    let gemini = GeminiClient::from_config(&config.llm)?;
    info!(
        model = %config.llm.model(),
        api_key = %mask_token(config.llm.api_key()),
        "Gemini model configured successfully."
    );

    Ok(BotComponents {
        handler_bot: Arc::new(TelegramBotAdapter::new(teloxide_bot)),
        analyzer,
        llm: Arc::new(gemini),
        sessions: SessionStore::new(),
        allowed_user_ids: config.allowed_user_ids().to_vec(),
        bot_username: Arc::new(tokio::sync::RwLock::new(None)),
    })
}

/// Logging → Auth → Command → Scan → Question.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    let bot = components.handler_bot.clone();
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AuthHandler::new(
            components.allowed_user_ids.clone(),
        )))
        .add_handler(Arc::new(CommandHandler::new(
            bot.clone(),
            components.bot_username.clone(),
        )))
        .add_handler(Arc::new(ScanHandler::new(
            bot.clone(),
            components.analyzer.clone(),
            components.sessions.clone(),
        )))
        .add_handler(Arc::new(QuestionHandler::new(
            bot,
            components.llm.clone(),
            components.sessions.clone(),
        )))
}
