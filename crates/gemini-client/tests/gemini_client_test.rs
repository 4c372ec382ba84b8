//! HTTP-level tests for [`GeminiClient`] against a local mockito server.
//!
//! No real Gemini API calls are made.

use gemini_client::{GeminiClient, LlmClient};
use mockito::Matcher;
use prompt::ChatMessage;
use serde_json::json;

const PATH: &str = "/models/gemini-1.5-flash:generateContent";

/// **Test: A successful response returns the candidate text; key header and body are sent.**
#[tokio::test]
async fn test_generate_content_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "test-api-key-123456")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{"role": "user", "parts": [{"text": "What is a meningioma?"}]}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "A meningioma grows from the meninges."}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 9, "totalTokenCount": 21}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("test-api-key-123456".to_string(), server.url());
    let answer = client
        .get_llm_response_with_messages(vec![ChatMessage::user("What is a meningioma?")])
        .await
        .unwrap();

    assert_eq!(answer, "A meningioma grows from the meninges.");
    mock.assert_async().await;
}

/// **Test: Non-2xx responses surface the status and the API error message.**
#[tokio::test]
async fn test_generate_content_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}})
                .to_string(),
        )
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("bad".to_string(), server.url());
    let err = client
        .get_llm_response_with_messages(vec![ChatMessage::user("hi")])
        .await
        .unwrap_err();

    let text = err.to_string();
    assert!(text.contains("400"), "{}", text);
    assert!(text.contains("API key not valid."), "{}", text);
}

/// **Test: A custom model changes the request path.**
#[tokio::test]
async fn test_custom_model_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_body(json!({"candidates": [{"content": {"parts": [{"text": "ok"}]}}]}).to_string())
        .create_async()
        .await;

    let client = GeminiClient::with_base_url("key".to_string(), server.url())
        .with_model("gemini-2.0-flash".to_string());
    let answer = client
        .get_llm_response_with_messages(vec![ChatMessage::user("ping")])
        .await
        .unwrap();

    assert_eq!(answer, "ok");
    mock.assert_async().await;
}

/// **Test: Only a system message is rejected before any request is made.**
#[tokio::test]
async fn test_system_only_is_rejected() {
    let client = GeminiClient::with_base_url("key".to_string(), "http://127.0.0.1:9".to_string());
    let err = client
        .get_llm_response_with_messages(vec![ChatMessage::system("Be brief.")])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No user or assistant messages"));
}
