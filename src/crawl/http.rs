// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Minimal HTTP/1.1 client over raw sockets.
//!
//! Requests are hand-built from a fixed template; responses are read to EOF
//! (the request asks the server to close) and parsed by a three-state machine:
//!
//! ```text
//! StatusLine ──"HTTP/x.y NNN"──▶ Headers ──blank line──▶ Body
//! ```
//!
//! `https` URLs go through a rustls client stream trusting the webpki roots.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::net::{IpAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};
use tracing::{debug, trace, warn};
use url::{Host, Url};

use crate::error::CrawlError;

/// Socket limits for one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    /// Bytes read before the response is cut off.
    pub max_response_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
            max_response_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Source of page markup for the crawler.
pub trait Fetcher: Send + Sync {
    /// The body of `url` if it is an HTML page; `None` for anything else,
    /// including every network or protocol failure.
    fn fetch_html(&self, url: &Url) -> Option<String>;
}

/// Build the GET request sent for `url`.
///
/// ```
/// # use url::Url;
/// let url = Url::parse("http://example.com/a/b?x=1").unwrap();
/// assert_eq!(
///     quarry::crawl::build_request(&url),
///     "GET /a/b?x=1 HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n"
/// );
/// ```
pub fn build_request(url: &Url) -> String {
    let mut target = url.path().to_string();
    if target.is_empty() {
        target.push('/');
    }
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    let host = url.host_str().unwrap_or_default();
    format!("GET {target} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n")
}

/// A parsed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Header fields keyed by lowercase name. Repeated fields keep the last value.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// True when `Content-Type` mentions "html", in any case.
    pub fn is_html(&self) -> bool {
        self.content_type()
            .is_some_and(|value| value.to_ascii_lowercase().contains("html"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    StatusLine,
    Headers,
    Body,
}

/// Parse a complete raw response.
///
/// # Errors
///
/// `CrawlError::MalformedResponse` when the status line is missing or not
/// HTTP, when the headers never end with a blank line, or when a chunked body
/// is broken.
pub fn parse_response(raw: &[u8]) -> Result<HttpResponse, CrawlError> {
    let mut state = ParseState::StatusLine;
    let mut status = 0;
    let mut headers = BTreeMap::new();
    let mut cursor = 0;

    while state != ParseState::Body {
        let Some((line, next)) = next_line(raw, cursor) else {
            return Err(malformed(match state {
                ParseState::StatusLine => "empty response",
                _ => "headers not terminated",
            }));
        };
        cursor = next;
        let line = String::from_utf8_lossy(line);

        state = match state {
            ParseState::StatusLine => {
                status = parse_status_line(&line)?;
                ParseState::Headers
            }
            ParseState::Headers if line.trim().is_empty() => ParseState::Body,
            ParseState::Headers => {
                match line.split_once(':') {
                    Some((name, value)) => {
                        headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
                    }
                    None => trace!(line = %line, "ignoring header line without a colon"),
                }
                ParseState::Headers
            }
            ParseState::Body => ParseState::Body,
        };
    }

    let mut body = &raw[cursor..];
    let decoded;
    let chunked = headers
        .get("transfer-encoding")
        .is_some_and(|value| value.to_ascii_lowercase().contains("chunked"));
    if chunked {
        decoded = decode_chunked(body)?;
        body = &decoded;
    } else if let Some(length) = headers
        .get("content-length")
        .and_then(|value| value.parse::<usize>().ok())
    {
        body = &body[..length.min(body.len())];
    }

    Ok(HttpResponse {
        status,
        headers,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

fn parse_status_line(line: &str) -> Result<u16, CrawlError> {
    let mut parts = line.split_whitespace();
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/") {
        return Err(malformed(format!("bad status line {line:?}")));
    }
    parts
        .next()
        .and_then(|code| code.parse().ok())
        .ok_or_else(|| malformed(format!("missing status code in {line:?}")))
}

/// Next `\n`-terminated line starting at `start`, without its `\r\n`.
fn next_line(raw: &[u8], start: usize) -> Option<(&[u8], usize)> {
    let rest = raw.get(start..)?;
    let end = rest.iter().position(|&b| b == b'\n')?;
    let line = &rest[..end];
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Some((line, start + end + 1))
}

fn decode_chunked(mut raw: &[u8]) -> Result<Vec<u8>, CrawlError> {
    let mut body = Vec::new();
    loop {
        let (line, next) = next_line(raw, 0).ok_or_else(|| malformed("truncated chunk size"))?;
        let line = String::from_utf8_lossy(line);
        let size_field = line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_field, 16)
            .map_err(|_| malformed(format!("bad chunk size {size_field:?}")))?;
        raw = &raw[next..];
        if size == 0 {
            return Ok(body);
        }
        let chunk = raw
            .get(..size)
            .ok_or_else(|| malformed("chunk shorter than declared"))?;
        body.extend_from_slice(chunk);
        raw = &raw[size..];
        raw = raw
            .strip_prefix(b"\r\n")
            .or_else(|| raw.strip_prefix(b"\n"))
            .unwrap_or(raw);
    }
}

fn malformed(reason: impl Into<String>) -> CrawlError {
    CrawlError::MalformedResponse(reason.into())
}

/// Fetches pages with hand-built requests over `TcpStream` and rustls.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    config: FetchConfig,
    tls: Arc<ClientConfig>,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Fails only if the TLS provider rejects its own default protocol versions.
    pub fn new(config: FetchConfig) -> Result<Self, CrawlError> {
        let roots = RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.into(),
        };
        let tls = ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();

        Ok(Self {
            config,
            tls: Arc::new(tls),
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Send a GET for `url` and parse whatever comes back.
    pub fn fetch(&self, url: &Url) -> Result<HttpResponse, CrawlError> {
        let host = url
            .host_str()
            .ok_or_else(|| CrawlError::InvalidUrl(url.to_string()))?;
        let request = build_request(url);
        let io_err = |source| CrawlError::Io {
            host: host.to_string(),
            source,
        };

        let stream = self.connect(url)?;
        let raw = match url.scheme() {
            "http" => exchange(stream, &request, self.config.max_response_bytes).map_err(io_err)?,
            "https" => {
                let name = server_name(url)?;
                let connection = ClientConnection::new(Arc::clone(&self.tls), name)?;
                let tls = StreamOwned::new(connection, stream);
                exchange(tls, &request, self.config.max_response_bytes).map_err(io_err)?
            }
            other => return Err(CrawlError::UnsupportedScheme(other.to_string())),
        };

        debug!(url = %url, bytes = raw.len(), "fetched");
        parse_response(&raw)
    }

    fn connect(&self, url: &Url) -> Result<TcpStream, CrawlError> {
        let host = url.host_str().unwrap_or_default();
        if url.port_or_known_default().is_none() {
            return Err(CrawlError::UnsupportedScheme(url.scheme().to_string()));
        }
        let io_err = |source| CrawlError::Io {
            host: host.to_string(),
            source,
        };
        // Resolves IPv6 literals without their brackets.
        let addr = url
            .socket_addrs(|| None)
            .map_err(|_| CrawlError::UnresolvedHost(host.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| CrawlError::UnresolvedHost(host.to_string()))?;

        let stream = TcpStream::connect_timeout(&addr, self.config.connect_timeout).map_err(io_err)?;
        stream
            .set_read_timeout(Some(self.config.read_timeout))
            .map_err(io_err)?;
        stream
            .set_write_timeout(Some(self.config.write_timeout))
            .map_err(io_err)?;
        Ok(stream)
    }
}

/// TLS server name for `url`: a DNS name, or a bare IP address.
fn server_name(url: &Url) -> Result<ServerName<'static>, CrawlError> {
    let invalid = || CrawlError::InvalidUrl(url.to_string());
    match url.host().ok_or_else(invalid)? {
        Host::Domain(domain) => ServerName::try_from(domain.to_string()).map_err(|_| invalid()),
        Host::Ipv4(ip) => Ok(ServerName::IpAddress(IpAddr::V4(ip).into())),
        Host::Ipv6(ip) => Ok(ServerName::IpAddress(IpAddr::V6(ip).into())),
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_html(&self, url: &Url) -> Option<String> {
        match self.fetch(url) {
            Ok(response) if response.is_html() => Some(response.body),
            Ok(response) => {
                debug!(
                    url = %url,
                    status = response.status,
                    content_type = response.content_type().unwrap_or("<none>"),
                    "skipping non-HTML response"
                );
                None
            }
            Err(e) => {
                warn!(url = %url, error = %e, "fetch failed");
                None
            }
        }
    }
}

/// Write `request`, then read until the peer closes or `limit` bytes arrive.
fn exchange<S: Read + Write>(mut stream: S, request: &str, limit: usize) -> io::Result<Vec<u8>> {
    stream.write_all(request.as_bytes())?;
    stream.flush()?;

    let mut raw = Vec::new();
    match stream.take(limit as u64).read_to_end(&mut raw) {
        Ok(_) => {}
        // Servers that close TLS without close_notify still sent a full response.
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && !raw.is_empty() => {}
        Err(e) => return Err(e),
    }
    if raw.len() >= limit {
        warn!(limit, "response truncated at size limit");
    }
    Ok(raw)
}
