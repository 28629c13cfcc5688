//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;
use url::Url;

pub use quarry::testing::{index_from, write_files, MemoryFetcher};

// ============================================================================
// HTTP FIXTURE SERVER
// ============================================================================

#[derive(Clone)]
struct Route {
    content_type: String,
    body: String,
}

/// Minimal HTTP/1.1 server on `127.0.0.1:0` serving canned pages.
///
/// Every response closes the connection, matching what the crawler asks for.
pub struct FixtureServer {
    addr: SocketAddr,
    routes: Arc<Mutex<HashMap<String, Route>>>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FixtureServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture server");
        let addr = listener.local_addr().expect("fixture address");
        let routes: Arc<Mutex<HashMap<String, Route>>> = Arc::default();
        let hits: Arc<Mutex<HashMap<String, usize>>> = Arc::default();
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&hits);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                for stream in listener.incoming() {
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                    let Ok(stream) = stream else { continue };
                    let routes = Arc::clone(&routes);
                    let hits = Arc::clone(&hits);
                    thread::spawn(move || serve(stream, &routes, &hits));
                }
            })
        };

        Self {
            addr,
            routes,
            hits,
            stop,
            handle: Some(handle),
        }
    }

    /// Serve `body` as `text/html` at `path`.
    pub fn page(&self, path: &str, body: &str) -> &Self {
        self.route(path, "text/html; charset=utf-8", body)
    }

    pub fn route(&self, path: &str, content_type: &str, body: &str) -> &Self {
        self.routes.lock().insert(
            path.to_string(),
            Route {
                content_type: content_type.to_string(),
                body: body.to_string(),
            },
        );
        self
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", self.addr, path)).expect("fixture url")
    }

    /// Requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().get(path).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().values().sum()
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        // Wake the accept loop so it sees the flag.
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve(
    stream: TcpStream,
    routes: &Mutex<HashMap<String, Route>>,
    hits: &Mutex<HashMap<String, usize>>,
) {
    let mut reader = BufReader::new(match stream.try_clone() {
        Ok(s) => s,
        Err(_) => return,
    });

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line.trim().is_empty() => break,
            Ok(_) => {}
        }
    }

    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();
    *hits.lock().entry(path.clone()).or_default() += 1;

    let route = routes.lock().get(&path).cloned();
    let (status, content_type, body) = match route {
        Some(route) => ("200 OK", route.content_type, route.body),
        None => ("404 Not Found", "text/plain".to_string(), "not found".to_string()),
    };
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let mut stream = stream;
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Anchor tags linking to each of `paths`, plus some filler text.
pub fn links_page(paths: &[&str], text: &str) -> String {
    let anchors: String = paths
        .iter()
        .map(|path| format!("<a href=\"{path}\">{path}</a>\n"))
        .collect();
    format!("<html><body><p>{text}</p>\n{anchors}</body></html>")
}
