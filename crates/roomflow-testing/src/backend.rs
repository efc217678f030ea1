//! Canned-response HTTP backend for integration tests.
//!
//! Serves on `127.0.0.1` from its own thread, so it works for both async
//! runtime tests and CLI tests that spawn the binary. Routes are matched on
//! method plus path relative to `/api/v1/`; unmatched requests get a 404
//! envelope. Every request is recorded for later assertions.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

const API_PREFIX: &str = "/api/v1/";

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: Value,
}

/// A request as the stub received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path relative to the API prefix, without the query string.
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Routes {
    /// Served once each, in order, before falling back to `fixed`.
    queued: HashMap<(String, String), VecDeque<StubResponse>>,
    fixed: HashMap<(String, String), StubResponse>,
}

pub struct StubBackend {
    base_url: String,
    routes: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl StubBackend {
    pub fn start() -> Self {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub backend");
        listener
            .set_nonblocking(true)
            .expect("Failed to make listener non-blocking");
        let addr = listener.local_addr().expect("Stub backend has no address");

        let routes = Arc::new(Mutex::new(Routes::default()));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let serve_routes = routes.clone();
        let serve_requests = requests.clone();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build stub backend runtime");
            runtime.block_on(async move {
                let listener =
                    TcpListener::from_std(listener).expect("Failed to adopt stub listener");
                tokio::select! {
                    _ = serve(listener, serve_routes, serve_requests) => {}
                    _ = shutdown_rx => {}
                }
            });
        });

        Self {
            base_url: format!("http://{}{}", addr, API_PREFIX),
            routes,
            requests,
            shutdown: Some(shutdown_tx),
        }
    }

    /// Base URL to hand to the client, ending in `/api/v1/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer every `method path` request with this response.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.routes.lock().expect("routes lock").fixed.insert(
            (method.to_uppercase(), path.trim_start_matches('/').to_string()),
            StubResponse { status, body },
        );
        self
    }

    /// Answer the next `method path` request with this response, once.
    pub fn respond_once(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.routes
            .lock()
            .expect("routes lock")
            .queued
            .entry((method.to_uppercase(), path.trim_start_matches('/').to_string()))
            .or_default()
            .push_back(StubResponse { status, body });
        self
    }

    /// `200` with `{ "success": true, "data": data }`.
    pub fn respond_data(&self, method: &str, path: &str, data: Value) -> &Self {
        self.respond(
            method,
            path,
            200,
            serde_json::json!({ "success": true, "data": data }),
        )
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method.eq_ignore_ascii_case(method) && r.path == path)
            .collect()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn serve(
    listener: TcpListener,
    routes: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) {
    loop {
        let Ok((socket, _)) = listener.accept().await else {
            continue;
        };
        let routes = routes.clone();
        let requests = requests.clone();
        tokio::spawn(async move {
            let _ = handle(socket, routes, requests).await;
        });
    }
}

async fn handle(
    mut socket: TcpStream,
    routes: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) -> std::io::Result<()> {
    let Some(request) = read_request(&mut socket).await? else {
        return Ok(());
    };

    let key = (request.method.clone(), request.path.clone());
    let response = {
        let mut routes = routes.lock().expect("routes lock");
        let queued = routes.queued.get_mut(&key).and_then(VecDeque::pop_front);
        queued
            .or_else(|| routes.fixed.get(&key).cloned())
            .unwrap_or_else(|| StubResponse {
                status: 404,
                body: serde_json::json!({ "success": false, "message": "Not found" }),
            })
    };
    requests.lock().expect("requests lock").push(request);

    let body = if response.body.is_null() {
        String::new()
    } else {
        response.body.to_string()
    };
    let raw = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason(response.status),
        body.len(),
        body
    );
    socket.write_all(raw.as_bytes()).await?;
    socket.shutdown().await
}

async fn read_request(socket: &mut TcpStream) -> std::io::Result<Option<RecordedRequest>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(None);
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default();

    let mut content_length = 0usize;
    let mut authorization = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("authorization") {
                authorization = Some(value.to_string());
            }
        }
    }

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = (body_start + content_length).min(buf.len());
    let body = serde_json::from_slice(&buf[body_start..body_end]).ok();

    let path = target.split('?').next().unwrap_or_default();
    let path = path
        .strip_prefix(API_PREFIX)
        .unwrap_or(path.trim_start_matches('/'))
        .to_string();

    Ok(Some(RecordedRequest {
        method,
        path,
        authorization,
        body,
    }))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
