//! HttpBackend against an in-process stub of the article backend.

use std::sync::{Arc, Mutex};

use article_editor_engine::{
    Backend, BackendError, Block, Cmd, Document, EditorSession, HttpBackend, ImageFile,
    SaveOutcome, SessionSettings, TextStyle,
};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

type Saved = Arc<Mutex<Vec<Value>>>;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn example_payload() -> Value {
    json!({
        "status": "success",
        "title": "Hi",
        "last_saved": "2024-01-01T00:00:00Z",
        "content": [{"type": "text", "style": "h1", "data": "Hello"}]
    })
}

async fn record_save(State(saved): State<Saved>, Json(body): Json<Value>) -> Json<Value> {
    saved.lock().unwrap().push(body);
    Json(json!({"status": "success", "message": "Content saved successfully"}))
}

async fn accept_upload(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() != Some("image") {
            continue;
        }
        let mime = field.content_type().map(str::to_string);
        let name = field.file_name().unwrap_or_default().to_string();
        if !matches!(
            mime.as_deref(),
            Some("image/jpeg" | "image/png" | "image/webp" | "image/gif")
        ) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"status": "error", "message": "Invalid file format"})),
            );
        }
        let bytes = field.bytes().await.unwrap();
        assert!(!bytes.is_empty());
        return (
            StatusCode::OK,
            Json(json!({"status": "success", "filePath": format!("/static/uploads/{name}")})),
        );
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"status": "error", "message": "File not found"})),
    )
}

fn article_backend(saved: Saved) -> Router {
    Router::new()
        .route("/load", get(|| async { Json(example_payload()) }))
        .route("/save", post(record_save))
        .route("/upload-image", post(accept_upload))
        .with_state(saved)
}

#[tokio::test]
async fn test_load_parses_document() {
    let base = serve(article_backend(Saved::default())).await;
    let backend = HttpBackend::new(&base).unwrap();

    let doc = backend.load().await.unwrap();

    assert_eq!(
        doc,
        Document::new(
            "Hi",
            "2024-01-01T00:00:00Z",
            vec![Block::text(TextStyle::H1, "Hello")]
        )
    );
}

#[tokio::test]
async fn test_load_error_payload_with_failure_status() {
    let app = Router::new().route(
        "/load",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "message": "Error loading data"})),
            )
        }),
    );
    let backend = HttpBackend::new(&serve(app).await).unwrap();

    let err = backend.load().await.unwrap_err();

    assert!(matches!(
        err,
        BackendError::Status { status: 500, message: Some(ref m) } if m == "Error loading data"
    ));
}

#[tokio::test]
async fn test_load_error_payload_with_ok_status() {
    let app = Router::new().route(
        "/load",
        get(|| async { Json(json!({"status": "error", "message": "db locked"})) }),
    );
    let backend = HttpBackend::new(&serve(app).await).unwrap();

    let err = backend.load().await.unwrap_err();

    assert!(matches!(err, BackendError::Application(ref m) if m == "db locked"));
}

#[tokio::test]
async fn test_load_malformed_body() {
    let app = Router::new().route("/load", get(|| async { "<html>not json</html>" }));
    let backend = HttpBackend::new(&serve(app).await).unwrap();

    let err = backend.load().await.unwrap_err();

    assert!(matches!(err, BackendError::Decode(_)));
}

#[tokio::test]
async fn test_save_posts_document_json() {
    let saved = Saved::default();
    let base = serve(article_backend(saved.clone())).await;
    let backend = HttpBackend::new(&base).unwrap();
    let doc = Document::new(
        "Title",
        "2024-03-01T12:00:00.000Z",
        vec![Block::text(TextStyle::P, "Body"), Block::image("/static/uploads/a.png")],
    );

    backend.save(&doc).await.unwrap();

    assert_eq!(
        saved.lock().unwrap().clone(),
        vec![json!({
            "title": "Title",
            "last_saved": "2024-03-01T12:00:00.000Z",
            "content": [
                {"type": "text", "data": "Body", "style": "p"},
                {"type": "image", "data": "/static/uploads/a.png"}
            ]
        })]
    );
}

#[tokio::test]
async fn test_upload_sends_image_field() {
    let base = serve(article_backend(Saved::default())).await;
    let backend = HttpBackend::new(&base).unwrap();
    let file = ImageFile::new("cat.png", "image/png", vec![0x89, b'P', b'N', b'G']);

    let url = backend.upload_image(&file).await.unwrap();

    assert_eq!(url, "/static/uploads/cat.png");
}

#[tokio::test]
async fn test_upload_rejected_by_server() {
    let base = serve(article_backend(Saved::default())).await;
    let backend = HttpBackend::new(&base).unwrap();
    let file = ImageFile::new("notes.txt", "text/plain", b"hello".to_vec());

    let err = backend.upload_image(&file).await.unwrap_err();

    assert_eq!(err.server_message(), Some("Invalid file format"));
}

#[tokio::test]
async fn test_upload_success_without_file_path() {
    let app = Router::new().route(
        "/upload-image",
        post(|| async { Json(json!({"status": "success"})) }),
    );
    let backend = HttpBackend::new(&serve(app).await).unwrap();
    let file = ImageFile::new("cat.png", "image/png", vec![1]);

    let err = backend.upload_image(&file).await.unwrap_err();

    assert!(matches!(err, BackendError::MissingFilePath));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let backend = HttpBackend::new(&format!("http://{addr}")).unwrap();

    let err = backend.load().await.unwrap_err();

    assert!(matches!(err, BackendError::Transport(_)));
}

#[tokio::test]
async fn test_session_load_edit_save_over_http() {
    let saved = Saved::default();
    let base = serve(article_backend(saved.clone())).await;
    let backend = HttpBackend::new(&base).unwrap();
    let mut session = EditorSession::new(SessionSettings::default());

    session.load(&backend).await;
    session
        .apply(Cmd::AddTextBlock {
            style: TextStyle::Caption,
            text: Some("photo credit".into()),
        })
        .unwrap();
    session.apply(Cmd::AddImageBlock { src: None }).unwrap();
    let outcome = session.save(&backend).await;

    assert_eq!(outcome, SaveOutcome::Saved);
    let body = saved.lock().unwrap()[0].clone();
    assert_eq!(body["title"], "Hi");
    assert_eq!(
        body["content"],
        json!([
            {"type": "text", "data": "Hello", "style": "h1"},
            {"type": "text", "data": "photo credit", "style": "caption"}
        ])
    );
    // The empty image block was dropped from the editor by the save
    assert_eq!(session.editor().len(), 2);
    assert_eq!(session.last_saved(), body["last_saved"].as_str());
}
