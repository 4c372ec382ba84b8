//! BotConfig: BaseConfig + DetectionSettings + Gemini config. Use load() for env-based loading.

use anyhow::Result;
use gemini_client::EnvLlmConfig;

use super::{BaseConfig, DetectionSettings};

pub struct BotConfig {
    pub base: BaseConfig,
    pub detection: DetectionSettings,
    pub llm: EnvLlmConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides
    /// TELEGRAM_BOT_TOKEN. Fails when the token or GEMINI_API_KEY is missing.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let detection = DetectionSettings::from_env()?;
        let llm = EnvLlmConfig::from_env()?;
        Ok(Self {
            base,
            detection,
            llm,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.detection.validate()?;
        if reqwest::Url::parse(&self.llm.gemini_base_url).is_err() {
            anyhow::bail!(
                "GEMINI_BASE_URL is not a valid URL: {}",
                self.llm.gemini_base_url
            );
        }
        Ok(())
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn allowed_user_ids(&self) -> &[i64] {
        &self.base.allowed_user_ids
    }
}
