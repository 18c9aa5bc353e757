//! Network provider tests
//!
//! Point the OpenAI and Gemini clients at an in-process axum stub and check
//! how replies and failures surface.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::Router;
use docsign_core::analysis::{GeminiProvider, OpenAiProvider};
use docsign_core::{AnalysisProvider, DocSignError, RiskLevel};
use serde_json::json;

const API_KEY: &str = "SECRET-KEY-123";

/// Request as seen by the stub
#[derive(Debug, Clone)]
struct SeenRequest {
    uri: String,
    headers: HeaderMap,
}

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

async fn reply(
    State(stub): State<Stub>,
    uri: Uri,
    headers: HeaderMap,
) -> impl axum::response::IntoResponse {
    stub.seen.lock().unwrap().push(SeenRequest {
        uri: uri.to_string(),
        headers,
    });
    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body,
    )
}

/// Serve `body` with `status` on an ephemeral port; returns the base URL
async fn spawn_stub(
    status: StatusCode,
    body: impl Into<String>,
) -> (String, Arc<Mutex<Vec<SeenRequest>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        status,
        body: body.into(),
        seen: Arc::clone(&seen),
    };
    let app = Router::new().fallback(reply).with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), seen)
}

fn openai_reply(content: &str) -> String {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] }).to_string()
}

fn gemini_reply(text: &str) -> String {
    json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
        .to_string()
}

fn provider_message(err: DocSignError) -> String {
    match err {
        DocSignError::Provider { message } => message,
        other => panic!("expected provider error, got {:?}", other),
    }
}

const FENCED_ANALYSIS: &str = "Segue a análise:\n```json\n{\"summary\": \"Contrato de locação\", \"keyPoints\": [\"multa\"], \"riskLevel\": \"high\", \"suggestions\": [\"revisar multa\"]}\n```";

// ═══════════════════════════════════════════════════════════════════════════
// OpenAI
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn openai_fenced_reply_is_parsed() {
    let (base, seen) = spawn_stub(StatusCode::OK, openai_reply(FENCED_ANALYSIS)).await;
    let provider = OpenAiProvider::new(API_KEY, "gpt-test").with_base_url(base);

    let result = provider.analyze_document("conteúdo").await.unwrap();
    assert_eq!(result.summary, "Contrato de locação");
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.suggestions, vec!["revisar multa".to_string()]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].uri, "/chat/completions");
    assert_eq!(
        seen[0].headers[header::AUTHORIZATION],
        format!("Bearer {}", API_KEY).as_str()
    );
}

#[tokio::test]
async fn openai_summary_is_trimmed_text() {
    let (base, _) = spawn_stub(StatusCode::OK, openai_reply("  Resumo curto.\n")).await;
    let provider = OpenAiProvider::new(API_KEY, "gpt-test").with_base_url(base);

    assert_eq!(provider.generate_summary("x").await.unwrap(), "Resumo curto.");
}

#[tokio::test]
async fn openai_non_success_status() {
    let (base, _) =
        spawn_stub(StatusCode::TOO_MANY_REQUESTS, r#"{"error":"rate limited"}"#).await;
    let provider = OpenAiProvider::new(API_KEY, "gpt-test").with_base_url(base);

    let message = provider_message(provider.generate_summary("x").await.unwrap_err());
    assert!(message.starts_with("OpenAI retornou 429"), "{}", message);
    assert!(message.contains("rate limited"));
}

#[tokio::test]
async fn openai_empty_choices() {
    let (base, _) = spawn_stub(StatusCode::OK, r#"{"choices":[]}"#).await;
    let provider = OpenAiProvider::new(API_KEY, "gpt-test").with_base_url(base);

    let message = provider_message(provider.generate_summary("x").await.unwrap_err());
    assert_eq!(message, "OpenAI não retornou conteúdo");
}

#[tokio::test]
async fn openai_malformed_body() {
    let (base, _) = spawn_stub(StatusCode::OK, "not json").await;
    let provider = OpenAiProvider::new(API_KEY, "gpt-test").with_base_url(base);

    let message = provider_message(provider.generate_summary("x").await.unwrap_err());
    assert!(message.starts_with("Resposta inválida da OpenAI"), "{}", message);
}

#[tokio::test]
async fn openai_reply_without_json() {
    let (base, _) = spawn_stub(StatusCode::OK, openai_reply("Não consegui analisar.")).await;
    let provider = OpenAiProvider::new(API_KEY, "gpt-test").with_base_url(base);

    let message = provider_message(provider.suggest_improvements("x").await.unwrap_err());
    assert!(message.contains("nenhum JSON encontrado"), "{}", message);
}

// ═══════════════════════════════════════════════════════════════════════════
// Gemini
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn gemini_key_travels_in_header() {
    let reply = gemini_reply("```json\n{\"compliant\": false, \"issues\": [\"Falta LGPD\"]}\n```");
    let (base, seen) = spawn_stub(StatusCode::OK, reply).await;
    let provider = GeminiProvider::new(API_KEY, "gemini-test").with_base_url(base);

    let rules = vec!["LGPD".to_string()];
    let result = provider.check_compliance("conteúdo", Some(rules.as_slice())).await.unwrap();
    assert!(!result.compliant);
    assert_eq!(result.issues, vec!["Falta LGPD".to_string()]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].uri, "/models/gemini-test:generateContent");
    assert!(!seen[0].uri.contains(API_KEY));
    assert_eq!(seen[0].headers["x-goog-api-key"], API_KEY);
}

#[tokio::test]
async fn gemini_unreachable_error_hides_key() {
    let provider = GeminiProvider::new(API_KEY, "gemini-test").with_base_url("http://127.0.0.1:1");

    let message = provider_message(provider.generate_summary("x").await.unwrap_err());
    assert!(message.starts_with("Falha ao chamar Gemini"), "{}", message);
    assert!(!message.contains(API_KEY), "{}", message);
}

#[tokio::test]
async fn openai_unreachable_error_hides_key() {
    let provider = OpenAiProvider::new(API_KEY, "gpt-test").with_base_url("http://127.0.0.1:1");

    let message = provider_message(provider.generate_summary("x").await.unwrap_err());
    assert!(message.starts_with("Falha ao chamar OpenAI"), "{}", message);
    assert!(!message.contains(API_KEY), "{}", message);
}

#[tokio::test]
async fn gemini_non_success_status() {
    let (base, _) =
        spawn_stub(StatusCode::BAD_REQUEST, r#"{"error":{"message":"bad model"}}"#).await;
    let provider = GeminiProvider::new(API_KEY, "gemini-test").with_base_url(base);

    let message = provider_message(provider.generate_summary("x").await.unwrap_err());
    assert!(message.starts_with("Gemini retornou 400"), "{}", message);
    assert!(!message.contains(API_KEY));
}

#[tokio::test]
async fn gemini_empty_candidates() {
    let (base, _) = spawn_stub(StatusCode::OK, r#"{"candidates":[]}"#).await;
    let provider = GeminiProvider::new(API_KEY, "gemini-test").with_base_url(base);

    let message = provider_message(provider.generate_summary("x").await.unwrap_err());
    assert_eq!(message, "Gemini não retornou conteúdo");
}

#[tokio::test]
async fn gemini_malformed_body() {
    let (base, _) = spawn_stub(StatusCode::OK, "<html>").await;
    let provider = GeminiProvider::new(API_KEY, "gemini-test").with_base_url(base);

    let message = provider_message(provider.analyze_document("x").await.unwrap_err());
    assert!(message.starts_with("Resposta inválida do Gemini"), "{}", message);
    assert!(!message.contains(API_KEY));
}
