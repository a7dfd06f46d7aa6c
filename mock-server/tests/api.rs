use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Backend, MockResponse, MockServer};
use tower::ServiceExt;

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(body.to_string())
        .unwrap()
}

// --- replay ---

#[tokio::test]
async fn empty_queue_answers_ok_with_empty_body() {
    let (backend, _rx) = Backend::new();
    let resp = app(backend).oneshot(request("GET", "/", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "");
}

#[tokio::test]
async fn serves_enqueued_response() {
    let (backend, _rx) = Backend::new();
    backend.enqueue(
        MockResponse::new()
            .set_body("Hello, World")
            .add_header("Content-Type", "application/json"),
    );

    let resp = app(backend).oneshot(request("GET", "/", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(body_string(resp).await, "Hello, World");
}

#[tokio::test]
async fn serves_enqueued_error_status() {
    let (backend, _rx) = Backend::new();
    backend.enqueue(MockResponse::new().set_status(404).set_body("missing"));

    let resp = app(backend).oneshot(request("DELETE", "/x", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(resp).await, "missing");
}

// --- record ---

#[tokio::test]
async fn records_method_path_headers_and_body() {
    let (backend, mut rx) = Backend::new();
    let req = Request::builder()
        .method("PATCH")
        .uri("/items?id=42")
        .header("X-Custom-Header", "some-value")
        .body("id=42&name=a+b".to_string())
        .unwrap();

    app(backend.clone()).oneshot(req).await.unwrap();

    let recorded = rx.recv().await.unwrap();
    assert_eq!(recorded.method, http::Method::PATCH);
    assert_eq!(recorded.path, "/items?id=42");
    assert_eq!(recorded.header("x-custom-header"), Some("some-value"));
    assert_eq!(recorded.body_utf8(), "id=42&name=a+b");
    assert_eq!(backend.request_count(), 1);
}

#[tokio::test]
async fn records_requests_in_arrival_order() {
    let (backend, mut rx) = Backend::new();
    let router = app(backend);

    router.clone().oneshot(request("GET", "/first", "")).await.unwrap();
    router.oneshot(request("PUT", "/second", "")).await.unwrap();

    assert_eq!(rx.recv().await.unwrap().path, "/first");
    assert_eq!(rx.recv().await.unwrap().path, "/second");
}

// --- live server ---

#[tokio::test]
async fn live_server_reports_local_url() {
    let server = MockServer::start().await.unwrap();

    assert_ne!(server.port(), 0);
    assert_eq!(server.url(), format!("http://127.0.0.1:{}", server.port()));
    assert_eq!(server.request_count(), 0);

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn live_server_stops_accepting_after_shutdown() {
    let server = MockServer::start().await.unwrap();
    let port = server.port();
    server.shutdown().await.unwrap();

    let result = tokio::net::TcpStream::connect(("127.0.0.1", port)).await;
    assert!(result.is_err());
}
