// src/test_support.rs
// =============================================================================
// Helpers shared by the unit tests (compiled only under `cargo test`).
//
// - TestServer: a tiny HTTP/1.1 server on 127.0.0.1 that answers each path
//   with a canned status code and body, and remembers every request line.
//   Tests point the scanner at it instead of the real internet.
// - capture_logs: runs a future with a scoped subscriber built from the same
//   layer as the log file, and returns what was written.
// =============================================================================

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::logging::log_layer;

#[derive(Clone)]
struct Route {
    status: u16,
    body: String,
}

#[derive(Default)]
pub struct TestServerBuilder {
    routes: HashMap<String, Route>,
}

impl TestServerBuilder {
    pub fn route(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub async fn spawn(self) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        let routes = Arc::new(self.routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    let _ = handle_connection(stream, &routes, &log).await;
                });
            }
        });

        TestServer { addr, requests }
    }
}

pub struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn start() -> TestServerBuilder {
        TestServerBuilder::default()
    }

    /// Absolute URL for `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Every request seen so far, as "METHOD /path"
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log").clone()
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    log: &Mutex<Vec<String>>,
) -> io::Result<()> {
    // GET and HEAD carry no body, so the request ends at the blank line
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request = String::from_utf8_lossy(&buf);
    let mut parts = request.lines().next().unwrap_or_default().split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();
    log.lock().expect("request log").push(format!("{} {}", method, path));

    let route = routes.get(&path).cloned().unwrap_or(Route {
        status: 404,
        body: String::new(),
    });
    let reason = reqwest::StatusCode::from_u16(route.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");

    let mut response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason,
        route.body.len()
    );
    if method != "HEAD" {
        response.push_str(&route.body);
    }

    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `future` with INFO-level events captured in the log-file layout
pub async fn capture_logs<F: Future>(future: F) -> (F::Output, String) {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::registry()
        .with(log_layer(move || writer.clone(), EnvFilter::new("info")));

    let guard = tracing::subscriber::set_default(subscriber);
    let output = future.await;
    drop(guard);

    let bytes = buffer.0.lock().expect("log buffer").clone();
    (output, String::from_utf8_lossy(&bytes).into_owned())
}
