use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;
use std::time::Duration;

use emcali_portfolio::error::DataUnavailable;
use emcali_portfolio::ingestion::csv::load_csv_from_path;
use emcali_portfolio::ingestion::remote::{fetch_csv, load_csv_from_url};
use emcali_portfolio::ingestion::{load_or_empty, load_table, HttpSheetSource, LoadOptions, LOAD_WARNING};
use emcali_portfolio::types::ProjectTable;

const FIXTURE: &str = "tests/fixtures/proyectos.csv";

/// Serve exactly one HTTP response on a loopback port; returns the URL and the server thread.
fn serve_once(status_line: &'static str, body: Vec<u8>) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/export.csv", listener.local_addr().unwrap());

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        // Drain request line and headers.
        loop {
            line.clear();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
        }
        let head = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/csv; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();
    });

    (url, handle)
}

fn options() -> LoadOptions {
    LoadOptions {
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

#[test]
fn fetch_returns_body_on_success() {
    let body = std::fs::read(FIXTURE).unwrap();
    let (url, server) = serve_once("200 OK", body.clone());

    let fetched = fetch_csv(&url, Duration::from_secs(5)).unwrap();
    server.join().unwrap();

    assert_eq!(fetched, body);
}

#[test]
fn remote_load_parses_served_csv() {
    let (url, server) = serve_once("200 OK", std::fs::read(FIXTURE).unwrap());

    let table = load_table(&HttpSheetSource::from_url(url), &options()).unwrap();
    server.join().unwrap();

    assert_eq!(table, load_csv_from_path(FIXTURE).unwrap());
    assert_eq!(table.row_count(), 6);
}

#[test]
fn not_found_is_status_error() {
    let (url, server) = serve_once("404 Not Found", b"not found".to_vec());

    let err = load_csv_from_url(&url, Duration::from_secs(5)).unwrap_err();
    server.join().unwrap();

    match err {
        DataUnavailable::Status { status, url: failed } => {
            assert_eq!(status, 404);
            assert_eq!(failed, url);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn server_error_degrades_to_empty_table() {
    let (url, server) = serve_once("500 Internal Server Error", Vec::new());

    let outcome = load_or_empty(&HttpSheetSource::from_url(url), &options());
    server.join().unwrap();

    assert!(outcome.is_degraded());
    assert_eq!(outcome.table, ProjectTable::empty());
    let warning = outcome.warning.unwrap();
    assert!(warning.starts_with(LOAD_WARNING));
    assert!(warning.contains("500"));
}

#[test]
fn served_body_without_required_columns_is_missing_columns() {
    let (url, server) = serve_once("200 OK", b"GERENCIAS,SERVICIOS\nA,X\n".to_vec());

    let err = load_csv_from_url(&url, Duration::from_secs(5)).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, DataUnavailable::MissingColumns { .. }));
}
