//! Tests for the OpenAI chat-completions client.

use araldo_core::TextGenerator;
use araldo_error::GenerationErrorKind;
use araldo_models::OpenAiClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new("test-key", "gpt-4o-mini").with_api_base(server.uri())
}

#[tokio::test]
async fn generate_returns_first_choice_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "## GraphQL\n\nA query language."}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server)
        .generate("Write a post about GraphQL")
        .await
        .unwrap();
    assert_eq!(text, "## GraphQL\n\nA query language.");
}

#[tokio::test]
async fn request_carries_model_prompt_and_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 800,
            "messages": [
                {"role": "system", "content": "You are an expert in web technologies."},
                {"role": "user", "content": "Write a post about Svelte"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .generate("Write a post about Svelte")
        .await
        .unwrap();
}

#[tokio::test]
async fn api_error_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("prompt").await.unwrap_err();
    match err.kind {
        GenerationErrorKind::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "rate limited");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("prompt").await.unwrap_err();
    assert_eq!(err.kind, GenerationErrorKind::EmptyResponse);
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("prompt").await.unwrap_err();
    assert!(matches!(err.kind, GenerationErrorKind::Parse(_)));
}
