//! Base config: Telegram Bot connection, logging, access list. Loaded from env.

use anyhow::{Context, Result};
use std::env;

/// Base config: Telegram-related, logging and the optional user allowlist.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// TELEGRAM_BOT_TOKEN (or BOT_TOKEN)
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// ALLOWED_USER_IDS; empty means everyone may use the bot
    pub allowed_user_ids: Vec<i64>,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides TELEGRAM_BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("TELEGRAM_BOT_TOKEN")
                .or_else(|_| env::var("BOT_TOKEN"))
                .ok()
                .filter(|s| !s.trim().is_empty())
                .context("TELEGRAM_BOT_TOKEN not found in environment variables. Bot cannot start.")?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/tumor-bot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let allowed_user_ids = match env::var("ALLOWED_USER_IDS") {
            Ok(raw) => parse_user_ids(&raw)?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            allowed_user_ids,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}

/// Parses a comma-separated list of Telegram user ids. Blank entries are skipped.
pub fn parse_user_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("Invalid user id in ALLOWED_USER_IDS: {}", s))
        })
        .collect()
}
