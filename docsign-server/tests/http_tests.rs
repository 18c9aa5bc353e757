//! HTTP route tests
//!
//! Drive the router in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use docsign_core::{
    Document, DocumentStatus, InMemoryDocumentStore, ProviderCache, ProviderConfig, User,
};
use docsign_server::{AppState, DocSignServer, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn sample_documents() -> Vec<Document> {
    let owner = User {
        id: "u1".to_string(),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        role: None,
    };
    let signer = User {
        id: "u2".to_string(),
        name: "Bruno".to_string(),
        email: "bruno@example.com".to_string(),
        role: None,
    };

    let mut contract = Document::new("Contrato", "Prestação de serviços", owner.clone(), &[signer]);
    contract.id = "doc-1".to_string();
    let mut archived = Document::new("Aditivo", "Aditivo contratual", owner, &[]);
    archived.id = "doc-2".to_string();
    archived.status = DocumentStatus::Signed;
    vec![contract, archived]
}

fn app_with(config: ServerConfig) -> Router {
    let state = AppState::from_store(
        Arc::new(InMemoryDocumentStore::with_documents(sample_documents())),
        Arc::new(ProviderCache::new(ProviderConfig::local())),
    );
    DocSignServer::new(state, config).router()
}

fn app() -> Router {
    app_with(ServerConfig::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn call(body: Value) -> Request<Body> {
    post_json("/mcp/call", &body.to_string())
}

fn envelope_text(body: &Value) -> Value {
    serde_json::from_str(body["content"][0]["text"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn health_is_outside_base_path() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    let (status, _) = send(app(), get("/mcp/health")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_tools() {
    let (status, body) = send(app(), get("/mcp/tools")).await;
    assert_eq!(status, StatusCode::OK);
    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 8);
    assert_eq!(tools[0]["name"], "get_documents");
    assert_eq!(tools[7]["name"], "get_user_documents");
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn call_get_document() {
    let (status, body) = send(
        app(),
        call(json!({ "name": "get_document", "arguments": { "documentId": "doc-1" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isError"], false);
    assert_eq!(envelope_text(&body)["id"], "doc-1");
}

#[tokio::test]
async fn call_missing_document_is_404() {
    let (status, body) = send(
        app(),
        call(json!({ "name": "get_document", "arguments": { "documentId": "missing" } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["isError"], true);
    assert_eq!(envelope_text(&body)["error"], "Documento não encontrado");
}

#[tokio::test]
async fn call_validation_failures_are_400() {
    let cases = [
        (json!({ "arguments": {} }), "Nome da ferramenta é obrigatório"),
        (json!({ "name": "" }), "Nome da ferramenta é obrigatório"),
        (json!({ "name": 42 }), "Nome da ferramenta é obrigatório"),
        (json!({ "name": "nope" }), "Ferramenta desconhecida: nope"),
        (
            json!({ "name": "get_document", "arguments": {} }),
            "documentId é obrigatório",
        ),
    ];

    for (request, message) in cases {
        let (status, body) = send(app(), call(request.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", request);
        assert_eq!(body["isError"], true);
        assert_eq!(envelope_text(&body)["error"], message);
    }
}

#[tokio::test]
async fn call_with_unparsable_body() {
    let (status, body) = send(app(), post_json("/mcp/call", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["isError"], true);
    assert_eq!(envelope_text(&body)["code"], "INVALID_REQUEST_BODY");
}

#[tokio::test]
async fn call_without_arguments_field() {
    let (status, body) = send(app(), call(json!({ "name": "get_documents" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope_text(&body).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_resources() {
    let (status, body) = send(app(), get("/mcp/resources")).await;
    assert_eq!(status, StatusCode::OK);
    let uris: Vec<&str> = body["resources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["uri"].as_str().unwrap())
        .collect();
    assert_eq!(uris, vec!["documents://all", "documents://pending"]);
}

#[tokio::test]
async fn read_resource_percent_encoded() {
    let (status, body) = send(app(), get("/mcp/resources/documents%3A%2F%2Fall")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contents"][0]["uri"], "documents://all");
    let docs: Vec<Document> =
        serde_json::from_str(body["contents"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(docs.len(), 2);

    let (status, body) = send(app(), get("/mcp/resources/documents%3A%2F%2Fpending")).await;
    assert_eq!(status, StatusCode::OK);
    let docs: Vec<Document> =
        serde_json::from_str(body["contents"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "doc-1");
}

#[tokio::test]
async fn read_unknown_resource_is_404() {
    let (status, body) = send(app(), get("/mcp/resources/unknown%3A%2F%2Fx")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "contents": [] }));
}

#[tokio::test]
async fn read_undecodable_resource_is_400() {
    let (status, body) = send(app(), get("/mcp/resources/%FF%FE")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "contents": [] }));
}

#[tokio::test]
async fn custom_and_root_base_paths() {
    let config = ServerConfig::builder().base_path("/api/v1/").build();
    let (status, _) = send(app_with(config.clone()), get("/api/v1/tools")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(app_with(config), get("/mcp/tools")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let config = ServerConfig::builder().base_path("/").cors(false).build();
    let (status, body) = send(app_with(config.clone()), get("/tools")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tools"].as_array().unwrap().len(), 8);
    let (status, _) = send(app_with(config), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
}
