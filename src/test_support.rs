//! In-crate test helpers: a minimal HTTP/1.1 server driven by a handler
//! closure, plus a current-thread runtime driver for async tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub(crate) struct ParsedRequest {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) body: String,
}

pub(crate) struct TestResponse {
    pub(crate) status: u16,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: String,
}

impl TestResponse {
    pub(crate) fn json(status: u16, body: &str) -> Self {
        TestResponse {
            status,
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body: body.to_owned(),
        }
    }
}

pub(crate) type Handler = dyn Fn(&ParsedRequest) -> TestResponse + Send + Sync;

pub(crate) fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

/// Spawns a local HTTP server; it lives until the test runtime drops.
pub(crate) async fn spawn_server(handler: Arc<Handler>) -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;

    drop(tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let handler = Arc::clone(&handler);
            drop(tokio::spawn(async move {
                serve_connection(stream, &handler).await;
            }));
        }
    }));

    Ok(format!("http://{}", addr))
}

async fn serve_connection(mut stream: TcpStream, handler: &Arc<Handler>) {
    let Some(request) = read_request(&mut stream).await else {
        return;
    };
    let response = handler(&request);
    let mut payload = format!(
        "HTTP/1.1 {} X\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        response.body.len()
    );
    for (name, value) in &response.headers {
        payload.push_str(name);
        payload.push_str(": ");
        payload.push_str(value);
        payload.push_str("\r\n");
    }
    payload.push_str("\r\n");
    payload.push_str(&response.body);
    drop(stream.write_all(payload.as_bytes()).await);
    drop(stream.flush().await);
}

async fn read_request(stream: &mut TcpStream) -> Option<ParsedRequest> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            return None;
        }
        buffer.extend_from_slice(chunk.get(..read)?);
        if let Some(position) = find_header_end(&buffer) {
            break position;
        }
        if buffer.len() > 64 * 1024 {
            return None;
        }
    };

    let header_bytes = buffer.get(..header_end)?;
    let header_text = std::str::from_utf8(header_bytes).ok()?;
    let mut lines = header_text.split("\r\n");
    let request_line = lines.next()?;
    let mut parts = request_line.split(' ');
    let method = parts.next()?.to_owned();
    let path = parts.next()?.to_owned();

    let mut headers = BTreeMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_owned());
        }
    }

    let content_length: usize = headers
        .get("content-length")
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);
    let body_start = header_end.checked_add(4)?;
    let mut body: Vec<u8> = buffer.get(body_start..).map(<[u8]>::to_vec).unwrap_or_default();
    while body.len() < content_length {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(chunk.get(..read)?);
    }

    Some(ParsedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
}
