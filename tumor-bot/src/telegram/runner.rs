//! REPL runner: converts teloxide messages to core messages and passes them to the HandlerChain.
//! Calls get_me once to populate the shared bot username used for `/cmd@botname` filtering.

use std::sync::Arc;

use anyhow::Result;
use handler_chain::HandlerChain;
use scan_core::ToCoreMessage;
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Starts the long-polling REPL with the given chain and bot username cache.
/// teloxide runs different chats concurrently and one chat's messages in arrival order; each
/// message is handled to completion before the next one from the same chat.
#[instrument(skip(bot, handler_chain, bot_username))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Brain Tumor Detection Bot is starting...");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed; commands addressed to any bot will be answered"),
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();

        async move {
            handle_update(&chain, &msg).await;
            Ok(())
        }
    })
    .await;

    Ok(())
}

/// Converts one update and runs it through the chain. Chain errors are logged, not returned,
/// so the REPL keeps polling.
pub async fn handle_update(chain: &HandlerChain, msg: &teloxide::types::Message) {
    let core_msg = TelegramMessageWrapper(msg).to_core();
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        message_id = %core_msg.id,
        kind = ?core_msg.kind,
        "step: processing message (handler chain started)"
    );
    if let Err(e) = chain.handle(&core_msg).await {
        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
    }
}
