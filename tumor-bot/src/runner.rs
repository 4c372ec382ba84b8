//! Main entry for `tumor-bot run`.

use anyhow::Result;
use scan_core::init_tracing;
use tracing::{error, info, instrument};

use crate::components::{build_bot_components, build_handler_chain, build_teloxide_bot};
use crate::config::BotConfig;
use crate::telegram::run_repl;

/// Validates config, initializes logging, builds components and the chain, then runs the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        model_path = %config.detection.model_path.display(),
        allowlist = config.allowed_user_ids().len(),
        "Initializing bot"
    );

    let teloxide_bot = build_teloxide_bot(&config);
    let components = build_bot_components(&config, teloxide_bot.clone()).map_err(|e| {
        error!(error = %e, "A critical error occurred during model initialization");
        e
    })?;
    let handler_chain = build_handler_chain(&components);

    info!(handlers = handler_chain.len(), "Bot started successfully");

    run_repl(teloxide_bot, handler_chain, components.bot_username.clone()).await
}
