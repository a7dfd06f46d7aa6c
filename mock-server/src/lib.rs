use std::{
    collections::VecDeque,
    io,
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::{
    net::TcpListener,
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::info;

/// A canned response served to the next incoming request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        }
    }
}

impl MockResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn set_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                response.headers_mut().insert(name, value);
            }
        }
        response
    }
}

/// A request as the server saw it.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path plus query string, e.g. `/?id=abc`.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body_utf8(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Shared state behind the router: queued responses and the request log.
#[derive(Clone)]
pub struct Backend {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    recorded: mpsc::UnboundedSender<RecordedRequest>,
    count: Arc<AtomicUsize>,
}

impl Backend {
    /// Create a backend and the receiving end of its request log.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RecordedRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let backend = Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            recorded: tx,
            count: Arc::new(AtomicUsize::new(0)),
        };
        (backend, rx)
    }

    pub fn enqueue(&self, response: MockResponse) {
        self.queue().push_back(response);
    }

    pub fn request_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> MockResponse {
        self.queue().pop_front().unwrap_or_default()
    }

    /// A panic while the lock was held does not lose queued responses.
    fn queue(&self) -> MutexGuard<'_, VecDeque<MockResponse>> {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn app(backend: Backend) -> Router {
    Router::new().fallback(record).with_state(backend)
}

/// Serve a fresh backend on `listener` until the process exits.
pub async fn run(listener: TcpListener) -> Result<(), io::Error> {
    let (backend, _recorded) = Backend::new();
    axum::serve(listener, app(backend)).await
}

async fn record(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> MockResponse {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());
    info!(%method, %path, bytes = body.len(), "recorded request");

    backend.count.fetch_add(1, Ordering::SeqCst);
    // The receiver is gone only when nobody is inspecting requests.
    let _ = backend.recorded.send(RecordedRequest {
        method,
        path,
        headers,
        body,
    });
    backend.next_response()
}

/// A mock HTTP server bound to an ephemeral local port.
///
/// Responses are served in the order they were enqueued; requests are
/// recorded in arrival order and can be inspected with `take_request`.
pub struct MockServer {
    addr: SocketAddr,
    backend: Backend,
    recorded: mpsc::UnboundedReceiver<RecordedRequest>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<io::Result<()>>>,
}

impl MockServer {
    pub async fn start() -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (backend, recorded) = Backend::new();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let router = app(backend.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(Self {
            addr,
            backend,
            recorded,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Base URL of the server, without a trailing slash.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn enqueue(&self, response: MockResponse) {
        self.backend.enqueue(response);
    }

    /// Wait for the next recorded request.
    pub async fn take_request(&mut self) -> Option<RecordedRequest> {
        self.recorded.recv().await
    }

    pub fn request_count(&self) -> usize {
        self.backend.request_count()
    }

    pub async fn shutdown(mut self) -> io::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        match self.handle.take() {
            Some(handle) => handle.await.map_err(io::Error::other)?,
            None => Ok(()),
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
