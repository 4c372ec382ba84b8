//! # scan-handlers
//!
//! Handlers for the tumor bot's chain: logging and allowlist auth, `/start` and `/help`,
//! scan analysis for uploaded images, and follow-up questions answered by the LLM.

mod commands;
mod findings;
mod logging;
mod question;
mod scan;
mod session;
mod text;

pub use commands::CommandHandler;
pub use findings::Findings;
pub use logging::{AuthHandler, LoggingHandler};
pub use question::{QuestionHandler, LLM_ERROR_MESSAGE, THINKING_MESSAGE};
pub use scan::{ScanHandler, ANALYSIS_ERROR_MESSAGE, ANALYZING_MESSAGE, ANNOTATED_FILE_NAME};
pub use session::SessionStore;
pub use text::{disclaimer_html, telegram_len, truncate_html, MAX_CAPTION_LEN, MAX_MESSAGE_LEN};
