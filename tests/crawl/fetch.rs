//! HttpFetcher against a live socket.

use super::common::FixtureServer;
use quarry::crawl::{FetchConfig, Fetcher, HttpFetcher};

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(FetchConfig::default()).expect("TLS config")
}

#[test]
fn html_pages_return_their_body() {
    let server = FixtureServer::start();
    server.page("/index.html", "<p>Hello fixture</p>");

    let body = fetcher().fetch_html(&server.url("/index.html"));
    assert_eq!(body.as_deref(), Some("<p>Hello fixture</p>"));
    assert_eq!(server.hits("/index.html"), 1);
}

#[test]
fn non_html_content_is_skipped() {
    let server = FixtureServer::start();
    server.route("/data.json", "application/json", "{\"a\": 1}");

    assert!(fetcher().fetch_html(&server.url("/data.json")).is_none());
    assert_eq!(server.hits("/data.json"), 1);
}

#[test]
fn content_type_match_is_case_insensitive() {
    let server = FixtureServer::start();
    server.route("/upper", "TEXT/HTML", "<b>ok</b>");

    assert_eq!(
        fetcher().fetch_html(&server.url("/upper")).as_deref(),
        Some("<b>ok</b>")
    );
}

#[test]
fn query_string_is_sent_and_fragment_is_not() {
    let server = FixtureServer::start();
    server.page("/search?q=cats", "<p>cats</p>");

    let response = fetcher()
        .fetch(&server.url("/search?q=cats#results"))
        .expect("fetch");
    assert_eq!(response.status, 200);
    assert!(response.is_html());
    assert_eq!(server.hits("/search?q=cats"), 1);
}

#[test]
fn missing_pages_are_not_html() {
    let server = FixtureServer::start();
    let response = fetcher().fetch(&server.url("/nope")).expect("fetch");
    assert_eq!(response.status, 404);
    assert!(fetcher().fetch_html(&server.url("/nope")).is_none());
}

#[test]
fn ipv6_literal_hosts_are_fetched() {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    // Hosts without IPv6 loopback have nothing to test.
    let Ok(listener) = TcpListener::bind("[::1]:0") else {
        return;
    };
    let port = listener.local_addr().expect("address").port();

    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut host = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).expect("read") == 0 || line.trim().is_empty() {
                break;
            }
            if let Some(value) = line.strip_prefix("Host:") {
                host = value.trim().to_string();
            }
        }
        let body = "<p>over six</p>";
        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .expect("write");
        host
    });

    let url = url::Url::parse(&format!("http://[::1]:{port}/")).expect("url");
    assert_eq!(fetcher().fetch_html(&url).as_deref(), Some("<p>over six</p>"));
    assert_eq!(server.join().expect("server thread"), "[::1]");
}
