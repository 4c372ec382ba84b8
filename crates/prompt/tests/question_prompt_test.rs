//! Unit tests for the follow-up question prompt.
//!
//! External interactions: none (pure function tests).

use prompt::{
    build_question_prompt, question_messages, scan_context, MessageRole, DISCLAIMER_BODY,
    DISCLAIMER_TITLE, GENERAL_CONTEXT,
};

/// **Test: Without findings the context is the general-question sentence.**
#[test]
fn context_without_findings_is_general() {
    assert_eq!(scan_context::<&str>(None), GENERAL_CONTEXT);
    assert_eq!(scan_context::<&str>(Some(&[][..])), GENERAL_CONTEXT);
}

/// **Test: Findings are joined with ", " inside single quotes.**
#[test]
fn context_with_findings_lists_them() {
    let ctx = scan_context(Some(&["Glioma Tumor", "Pituitary Tumor"][..]));
    assert_eq!(
        ctx,
        "A user's brain scan analysis has indicated a potential 'Glioma Tumor, Pituitary Tumor'. \
The user is now asking a follow-up question."
    );
}

/// **Test: Prompt has persona, context, instruction, then the quoted question after a blank line.**
#[test]
fn prompt_layout() {
    let findings = vec!["Meningioma Tumor".to_string()];
    let out = build_question_prompt("Is it curable?", Some(findings.as_slice()));
    assert!(out.starts_with("You are a helpful medical information AI. A user's brain scan"));
    assert!(out.contains("'Meningioma Tumor'"));
    assert!(out.contains("Provide general information only.\n\nUser's Question: 'Is it curable?'"));
}

/// **Test: General prompt does not mention a scan result.**
#[test]
fn prompt_general() {
    let out = build_question_prompt::<&str>("What causes tumors?", None);
    assert!(out.contains(GENERAL_CONTEXT));
    assert!(!out.contains("indicated a potential"));
}

/// **Test: question_messages yields a single user message holding the prompt.**
#[test]
fn messages_single_user() {
    let msgs = question_messages::<&str>("hi", None);
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].role, MessageRole::User);
    assert!(msgs[0].content.ends_with("User's Question: 'hi'"));
}

/// **Test: Disclaimer advises consulting a doctor.**
#[test]
fn disclaimer_text() {
    assert_eq!(DISCLAIMER_TITLE, "Important Disclaimer:");
    assert!(DISCLAIMER_BODY.contains("consult a qualified doctor"));
}
