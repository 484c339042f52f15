mod common;

use std::time::Duration;

use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ollama_assist::client::{encode_chat_request, Message, OllamaClient, StructuredDecoder};
use ollama_assist::error::ErrorKind;
use ollama_assist::{ClientConfig, ClientState};

use common::{blocking, config_for, unused_local_host};

const TAGS_BODY: &str = r#"{"models":[{"name":"llama2:latest","model":"llama2:latest","size":3825819519},{"name":"mistral:7b","model":"mistral:7b","size":4109865159}]}"#;

#[tokio::test]
async fn test_chat_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("content-type", "application/json"))
        .and(body_string(
            r#"{"model":"llama2","messages":[{"role":"user","content":"hi"}],"stream":false}"#,
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"message":{"content":"hi there"}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let response = blocking(move || OllamaClient::new(config).chat_text("hi")).await;

    assert!(response.success);
    assert_eq!(response.content, "hi there");
    assert!(response.error.is_empty());
    assert_eq!(response.status_code, Some(200));
}

#[tokio::test]
async fn test_chat_sends_conversation_in_order() {
    let server = MockServer::start().await;
    let messages = vec![
        Message::user("What is RAII?"),
        Message::assistant("Resource acquisition is \"initialization\"."),
        Message::user("Show an example"),
    ];

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_string(encode_chat_request("codellama", &messages)))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"model":"codellama","message":{"role":"assistant","content":"struct Guard;"},"done":true}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::enabled(server.uri(), "codellama");
    let response = blocking(move || OllamaClient::new(config).chat(&messages)).await;

    assert!(response.success);
    assert_eq!(response.content, "struct Guard;");
}

#[tokio::test]
async fn test_chat_unexpected_body_is_parse_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"error":"model 'llama2' not found"}"#),
        )
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let (response, last_error) = blocking(move || {
        let mut client = OllamaClient::new(config);
        let response = client.chat_text("hi");
        (response, client.last_error().to_string())
    })
    .await;

    assert!(!response.success);
    assert!(response.content.is_empty());
    assert_eq!(response.error, "Failed to parse response");
    assert_eq!(response.error_kind, Some(ErrorKind::ParseFailed));
    assert_eq!(response.status_code, Some(404));
    assert_eq!(last_error, "Failed to parse response");
}

#[tokio::test]
async fn test_chat_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let response = blocking(move || OllamaClient::new(config).chat_text("hi")).await;

    assert_eq!(response.error, "Empty response from server");
    assert_eq!(response.error_kind, Some(ErrorKind::EmptyResponse));
}

#[tokio::test]
async fn test_chat_with_structured_decoder_unescapes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"message":{"role":"assistant","content":"line one\nline \"two\""},"done":true}"#,
        ))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let response = blocking(move || {
        OllamaClient::new(config)
            .with_decoder(StructuredDecoder)
            .chat_text("hi")
    })
    .await;

    assert!(response.success);
    assert_eq!(response.content, "line one\nline \"two\"");
}

#[tokio::test]
async fn test_analyze_code_sends_prompt() {
    let server = MockServer::start().await;
    let code = "int main() { int x = 5; return x; }";
    let prompt = ollama_assist::prompts::analyze_code_prompt(code, "cpp");

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_string(encode_chat_request(
            "llama2",
            &[Message::user(prompt)],
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"message":{"content":"Looks fine."}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let response = blocking(move || OllamaClient::new(config).analyze_code(code, "cpp")).await;

    assert!(response.success);
    assert_eq!(response.content, "Looks fine.");
}

#[tokio::test]
async fn test_list_models() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TAGS_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let models = blocking(move || OllamaClient::new(config).list_models()).await;

    assert_eq!(models, vec!["llama2:latest", "mistral:7b"]);
}

#[tokio::test]
async fn test_list_models_empty_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"models":[]}"#))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let (models, last_error) = blocking(move || {
        let mut client = OllamaClient::new(config);
        let models = client.list_models();
        (models, client.last_error().to_string())
    })
    .await;

    assert!(models.is_empty());
    assert!(last_error.is_empty());
}

#[tokio::test]
async fn test_connection_succeeds_on_any_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not even json"))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let (first, second, state) = blocking(move || {
        let mut client = OllamaClient::new(config);
        let first = client.test_connection();
        let second = client.test_connection();
        (first, second, client.state())
    })
    .await;

    assert!(first);
    assert!(second);
    assert_eq!(state, ClientState::Initialized);
}

#[tokio::test]
async fn test_pull_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pull"))
        .and(body_string(r#"{"name":"mistral"}"#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{\"status\":\"pulling manifest\"}\n{\"status\":\"success\"}\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let pulled = blocking(move || OllamaClient::new(config).pull_model("mistral")).await;

    assert!(pulled);
}

#[tokio::test]
async fn test_pull_model_empty_body_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pull"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let (pulled, last_error) = blocking(move || {
        let mut client = OllamaClient::new(config);
        (client.pull_model("mistral"), client.last_error().to_string())
    })
    .await;

    assert!(!pulled);
    assert_eq!(last_error, "Empty response from server");
}

#[tokio::test]
async fn test_timeout_is_enforced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"message":{"content":"too late"}}"#)
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server.uri());
    config.timeout_ms = 100;
    let response = blocking(move || OllamaClient::new(config).chat_text("hi")).await;

    assert!(!response.success);
    assert_eq!(response.error_kind, Some(ErrorKind::SendFailed));
    assert!(response.error.starts_with("Failed to send chat request: "));
}

#[test]
fn test_unreachable_server_reports_send_failure() {
    let mut client = OllamaClient::new(ClientConfig::enabled(unused_local_host(), "llama2"));

    let response = client.chat_text("hi");
    assert!(!response.success);
    assert_eq!(response.error_kind, Some(ErrorKind::SendFailed));
    assert!(response.error.starts_with("Failed to send chat request: "));
    assert!(response.error.len() > "Failed to send chat request: ".len());

    assert!(!client.test_connection());
    assert!(client.last_error().starts_with("Connection test failed: "));

    assert!(client.list_models().is_empty());
    assert!(client.last_error().starts_with("Failed to list models: "));

    assert!(!client.pull_model("phi"));
    assert!(client.last_error().starts_with("Failed to pull model: phi: "));
}

#[test]
fn test_disabled_client_never_connects() {
    let mut client = OllamaClient::new(ClientConfig {
        enabled: false,
        host: unused_local_host(),
        ..Default::default()
    });

    assert!(!client.test_connection());
    assert_eq!(client.last_error(), "Ollama client is disabled");
    assert_eq!(client.state(), ClientState::Failed);

    let response = client.generate_documentation("fn main() {}", "rust");
    assert_eq!(response.error_kind, Some(ErrorKind::Disabled));
}
