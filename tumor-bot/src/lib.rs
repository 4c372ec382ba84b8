//! # Brain tumor scan bot
//!
//! Wires the handler chain (logging, auth, commands, scan analysis, questions) to Telegram.
//! Loads config from env, builds the detector and the Gemini client, and runs the REPL.

pub mod cli;
pub mod components;
pub mod config;
pub mod detect;
pub mod runner;
pub mod telegram;
pub mod weights;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{BaseConfig, BotConfig, DetectionSettings};
pub use runner::run_bot;
pub use telegram::{
    handle_update, run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper,
};
