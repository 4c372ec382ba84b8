//! # scan-core
//!
//! Core types and traits for the tumor scan bot: [`Bot`], [`Handler`], message and user types,
//! and tracing initialization. Transport-agnostic; used by handler-chain, scan-handlers and tumor-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{HandlerError, Result, ScanError};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageKind, ToCoreMessage,
    ToCoreUser, User,
};
