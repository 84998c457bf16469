use std::path::Path;

use adlens_server::{ServerConfig, ServerState, app};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "adlens-test-boundary";
const SAMPLE: &str = "Nome do Produto,Cliques,CTR,ROAS\nA,10,5%,2.5\nA,20,7%,3.1\nB,3,1%,0.4\n";

fn test_app(upload_dir: &Path) -> Router {
    test_app_with_limit(upload_dir, 1024 * 1024)
}

fn test_app_with_limit(upload_dir: &Path, max_upload_bytes: usize) -> Router {
    let config = ServerConfig {
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes,
        ..Default::default()
    };
    app(ServerState::new(&config), config.max_upload_bytes)
}

fn multipart_upload(field: &str, file_name: Option<&str>, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    let disposition = match file_name {
        Some(name) => format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        ),
        None => format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n"),
    };
    body.extend_from_slice(disposition.as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/uploads")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn upload_sample(app: &Router) -> String {
    let (status, body) =
        send_json(app, multipart_upload("file", Some("vendas.csv"), SAMPLE.as_bytes())).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_banner_and_health() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"adlens API Server");

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_upload_creates_session() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let (status, body) =
        send_json(&app, multipart_upload("file", Some("vendas.csv"), SAMPLE.as_bytes())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["file_name"], "vendas.csv");
    assert_eq!(body["products"], serde_json::json!(["A", "B"]));
    assert_eq!(
        body["columns"],
        serde_json::json!(["Nome do Produto", "Cliques", "CTR", "ROAS"])
    );
    assert_eq!(body["row_count"], 3);
    assert!(body["session_id"].as_str().is_some());

    let stored = std::fs::read_to_string(dir.path().join("vendas.csv")).unwrap();
    assert_eq!(stored, SAMPLE);
}

#[tokio::test]
async fn test_upload_sanitizes_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let (status, body) = send_json(
        &app,
        multipart_upload("file", Some("../relatorio final.csv"), SAMPLE.as_bytes()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["file_name"], "relatorio_final.csv");
    assert!(dir.path().join("relatorio_final.csv").exists());
}

#[tokio::test]
async fn test_products_metrics_and_chart() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());
    let id = upload_sample(&app).await;

    let (status, body) = send_json(&app, get(&format!("/api/sessions/{id}/products"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"], serde_json::json!(["A", "B"]));

    let (status, body) =
        send_json(&app, get(&format!("/api/sessions/{id}/products/A/metrics"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"], "A");
    assert_eq!(body["title"], "Métricas do Produto: A");
    let metrics = body["metrics"].as_array().unwrap();
    let names: Vec<&str> = metrics.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Cliques", "CTR", "ROAS"]);
    assert_eq!(metrics[0]["value"].as_f64(), Some(20.0));
    assert_eq!(metrics[1]["value"].as_f64(), Some(7.0));
    assert_eq!(metrics[2]["value"].as_f64(), Some(3.1));

    let (status, body) =
        send_json(&app, get(&format!("/api/sessions/{id}/products/B/chart"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Métricas para o produto: B");
    assert_eq!(body["x_axis"], "Métricas");
    assert_eq!(body["y_axis"], "Valores");
    assert_eq!(body["labels"], serde_json::json!(["Cliques", "CTR"]));
    assert_eq!(body["values"], serde_json::json!([3.0, 1.0]));
}

#[tokio::test]
async fn test_unknown_product_has_no_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());
    let id = upload_sample(&app).await;

    let (status, body) =
        send_json(&app, get(&format!("/api/sessions/{id}/products/Z/metrics"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metrics"], serde_json::json!([]));

    let (status, body) =
        send_json(&app, get(&format!("/api/sessions/{id}/products/Z/chart"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["labels"], serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let (status, body) = send_json(
        &app,
        get("/api/sessions/00000000-0000-0000-0000-000000000000/products"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().starts_with("Sessão não encontrada"));

    let (status, _) = send_json(&app, get("/api/sessions/nao-existe/products")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_summary_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());
    let id = upload_sample(&app).await;

    let (status, body) = send_json(&app, get(&format!("/api/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], id.as_str());
    assert_eq!(body["product_count"], 2);

    let (status, _) = send(&app, delete(&format!("/api/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get(&format!("/api/sessions/{id}/products"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());
    let first = upload_sample(&app).await;

    let other = "Nome do Produto,Cliques\nC,1\n";
    let (status, _) =
        send_json(&app, multipart_upload("file", Some("outro.csv"), other.as_bytes())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send_json(&app, get(&format!("/api/sessions/{first}/products"))).await;
    assert_eq!(body["products"], serde_json::json!(["A", "B"]));
}

#[tokio::test]
async fn test_upload_rejections() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let (status, _) =
        send_json(&app, multipart_upload("arquivo", Some("vendas.csv"), b"x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(&app, multipart_upload("file", Some(""), b"x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(&app, multipart_upload("file", None, b"x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(&app, multipart_upload("file", Some("notas.pdf"), b"x")).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"], "Tipo de arquivo não permitido: notas.pdf");
}

#[tokio::test]
async fn test_missing_grouping_column_is_unprocessable() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let (status, body) = send_json(
        &app,
        multipart_upload("file", Some("sem.csv"), b"Produto,Cliques\nA,1\n"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "Erro: A coluna 'Nome do Produto' não está presente no arquivo."
    );
    assert_eq!(body["products"], serde_json::json!([]));
}

#[tokio::test]
async fn test_unreadable_file_is_unprocessable() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let (status, body) = send_json(
        &app,
        multipart_upload("file", Some("quebrado.csv"), b"Nome do Produto,Cliques\nA,1,2\n"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "Erro: Erro ao ler o arquivo: problema ao analisar o arquivo CSV ou Excel."
    );

    let (status, _) = send_json(
        &app,
        multipart_upload("file", Some("quebrado.xlsx"), b"not a zip archive"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app_with_limit(dir.path(), 64);

    let big = SAMPLE.repeat(10);
    let (status, _) = send(&app, multipart_upload("file", Some("vendas.csv"), big.as_bytes())).await;
    assert!(status.is_client_error(), "{status}");
    assert!(!dir.path().join("vendas.csv").exists());
}
