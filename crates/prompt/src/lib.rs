//! # Prompt
//!
//! Builds the text sent to the language model for a follow-up question, and the disclaimer
//! appended to every answer.
//!
//! ## Format
//!
//! `You are a helpful medical information AI. {context} Answer their question ... \n\nUser's Question: '{question}'`
//!
//! where `{context}` is either the general-question sentence or names the tumor types found in the
//! user's last scan.

/// Role of a message; maps to the Gemini `systemInstruction` / `user` / `model` roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Persona sentence that opens every prompt.
pub const PERSONA: &str = "You are a helpful medical information AI.";

/// Context sentence when the user has no prior scan findings.
pub const GENERAL_CONTEXT: &str = "A user is asking a general question about brain tumors.";

/// Tone and scope instruction that follows the context sentence.
pub const ANSWER_INSTRUCTION: &str =
    "Answer their question in a clear, simple, and reassuring tone. Provide general information only.";

/// Heading of the disclaimer.
pub const DISCLAIMER_TITLE: &str = "Important Disclaimer:";

/// Body of the disclaimer.
pub const DISCLAIMER_BODY: &str = "I am an AI assistant, not a medical professional. This information is for educational purposes only. Please consult a qualified doctor for diagnosis and medical advice.";

/// Context sentence for the prompt. Empty or missing findings fall back to [`GENERAL_CONTEXT`].
pub fn scan_context<S: AsRef<str>>(last_findings: Option<&[S]>) -> String {
    match last_findings {
        Some(findings) if !findings.is_empty() => {
            let list = findings
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "A user's brain scan analysis has indicated a potential '{}'. The user is now asking a follow-up question.",
                list
            )
        }
        _ => GENERAL_CONTEXT.to_string(),
    }
}

/// Full prompt for a follow-up question.
pub fn build_question_prompt<S: AsRef<str>>(question: &str, last_findings: Option<&[S]>) -> String {
    format!(
        "{} {} {}\n\nUser's Question: '{}'",
        PERSONA,
        scan_context(last_findings),
        ANSWER_INSTRUCTION,
        question
    )
}

/// Prompt wrapped as the message list an `LlmClient` takes.
pub fn question_messages<S: AsRef<str>>(
    question: &str,
    last_findings: Option<&[S]>,
) -> Vec<ChatMessage> {
    vec![ChatMessage::user(build_question_prompt(question, last_findings))]
}
