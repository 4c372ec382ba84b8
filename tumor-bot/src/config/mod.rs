//! Bot configuration: BaseConfig (Telegram + log + access) + DetectionSettings + Gemini settings.

mod base;
mod bot_config;
mod detection;

#[cfg(test)]
mod tests;

pub use base::{parse_user_ids, BaseConfig};
pub use bot_config::BotConfig;
pub use detection::{DetectionSettings, DEFAULT_MODEL_PATH};
