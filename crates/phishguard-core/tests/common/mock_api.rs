//! Minimal HTTP/1.1 server standing in for the reputation service in integration tests.
//!
//! Answers every GET with a canned (status, body) chosen by a handler closure
//! and records the request target (path + query) of each request.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    /// Wait this long before answering (simulates a slow service).
    pub delay: Duration,
}

impl MockResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub struct MockApi {
    /// Base URL to configure the client with, e.g. "http://127.0.0.1:12345/api/json/url".
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    /// Request targets seen so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// The decoded `url` query parameter of every request seen so far.
    pub fn submitted_targets(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|target| {
                let full = url::Url::parse(&format!("http://mock{}", target)).ok()?;
                full.query_pairs()
                    .find(|(k, _)| k == "url")
                    .map(|(_, v)| v.into_owned())
            })
            .collect()
    }
}

/// Starts a server answering every request with `response`. Runs until the process exits.
pub fn start(response: MockResponse) -> MockApi {
    start_with(move |_| response.clone())
}

/// Starts a server whose answer depends on the request target.
pub fn start_with<F>(handler: F) -> MockApi
where
    F: Fn(&str) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let handler = Arc::new(handler);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let handler = Arc::clone(&handler);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, handler.as_ref(), &seen));
        }
    });
    MockApi {
        base_url: format!("http://127.0.0.1:{}/api/json/url", port),
        requests,
    }
}

/// A base URL nothing listens on (connection refused).
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/json/url", port)
}

fn handle<F>(mut stream: TcpStream, handler: &F, seen: &Mutex<Vec<String>>)
where
    F: Fn(&str) -> MockResponse + ?Sized,
{
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let request = String::from_utf8_lossy(&buf);
    let mut first = request.lines().next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("");
    let target = first.next().unwrap_or("").to_string();
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    seen.lock().unwrap().push(target.clone());

    let response = handler(&target);
    if !response.delay.is_zero() {
        thread::sleep(response.delay);
    }
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason(response.status),
        response.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
