//! Shared helpers for integration tests: a local feed server and log capture.

#![allow(dead_code)]

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Local HTTP server answering every request with the same canned response.
pub struct FeedServer {
    /// `http://127.0.0.1:<port>`, usable as a base URL override.
    pub base_url: String,
    /// Number of requests served so far.
    hits: Arc<AtomicUsize>,
    /// Raw request heads, in arrival order.
    requests: Arc<Mutex<Vec<String>>>,
}

impl FeedServer {
    /// Requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Raw request heads (request line plus headers), lowercased.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

/// What: Start a server replying `status` with `body` to every request.
///
/// Inputs:
/// - `status`: HTTP status code.
/// - `body`: Response body, sent as `application/json`.
///
/// Output:
/// - Handle with the base URL and request log.
///
/// Details:
/// - Runs on the test's runtime; connections are closed after each response.
pub async fn serve(status: u16, body: &str) -> FeedServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let (task_hits, task_requests) = (Arc::clone(&hits), Arc::clone(&requests));
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        head.extend_from_slice(&buf[..n]);
                        if head.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                }
            }
            task_requests
                .lock()
                .expect("requests lock")
                .push(String::from_utf8_lossy(&head).to_lowercase());
            task_hits.fetch_add(1, Ordering::SeqCst);
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    FeedServer {
        base_url: format!("http://{addr}"),
        hits,
        requests,
    }
}

/// What: A base URL nothing listens on.
///
/// Output:
/// - `http://127.0.0.1:<port>` for a port that was just released.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// In-memory log sink for `tracing_subscriber::fmt`.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Captured output split into lines.
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().expect("log lock").clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// What: Install a thread-local subscriber capturing `warn` and above.
///
/// Output:
/// - The sink and the guard keeping the subscriber active.
pub fn capture_warnings() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

/// A typical Wikimedia body: two featured events and one birth.
pub const WIKIMEDIA_BODY: &str = r#"{
  "selected": [
    {"text": "The first event", "year": 1990, "pages": []},
    {"text": "The second event", "year": 1066}
  ],
  "births": [
    {"text": "Someone was born", "year": 1900}
  ]
}"#;
