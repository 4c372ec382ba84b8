//! Telegram HTML text helpers.

use prompt::{DISCLAIMER_BODY, DISCLAIMER_TITLE};
use teloxide::utils::html;

/// Telegram limit for message text, in UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Telegram limit for media captions, in UTF-16 code units.
pub const MAX_CAPTION_LEN: usize = 1024;

/// Disclaimer with a bold heading, starting with a blank line.
pub fn disclaimer_html() -> String {
    format!("\n\n{} {}", html::bold(DISCLAIMER_TITLE), DISCLAIMER_BODY)
}

/// Length as Telegram counts it: emoji outside the BMP take two units.
pub fn telegram_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Cuts escaped HTML text to at most `limit` UTF-16 units without splitting a character or an
/// entity like `&amp;`.
pub fn truncate_html(text: &str, limit: usize) -> String {
    let mut units = 0;
    let mut cut = None;
    for (i, c) in text.char_indices() {
        units += c.len_utf16();
        if units > limit {
            cut = Some(i);
            break;
        }
    }
    let Some(cut) = cut else {
        return text.to_string();
    };
    let mut head = &text[..cut];
    if let Some(amp) = head.rfind('&') {
        if !head[amp..].contains(';') {
            head = &head[..amp];
        }
    }
    head.to_string()
}
