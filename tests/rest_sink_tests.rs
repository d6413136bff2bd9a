use dumprestore::config::Config;
use dumprestore::errors::AppError;
use dumprestore::models::{Row, SqlValue};
use dumprestore::sink::{RestSink, UpsertSink};
use serde_json::Number;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// What the backend received: request line, lowercased header lines and body.
struct Captured {
    request_line: String,
    headers: Vec<String>,
    body: String,
}

/// Accept one request, answer with `status` and `reply`, hand back what was sent.
fn one_shot_backend(status: &'static str, reply: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let url = format!("http://{}", listener.local_addr().expect("local addr"));

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        stream
            .set_read_timeout(Some(Duration::from_secs(10)))
            .expect("read timeout");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("request line");

        let mut headers = Vec::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("header line");
            let line = line.trim_end().to_string();
            if line.is_empty() {
                break;
            }
            let lower = line.to_ascii_lowercase();
            if let Some(len) = lower.strip_prefix("content-length:") {
                content_length = len.trim().parse().expect("content length");
            }
            headers.push(lower);
        }

        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).expect("body");

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
            reply.len()
        )
        .expect("write response");
        stream.flush().ok();

        Captured {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(body).expect("utf8 body"),
        }
    });

    (url, handle)
}

fn rest_config(url: &str) -> Config {
    let mut cfg = Config::default();
    cfg.backend_url = url.to_string();
    cfg.api_key = "k".to_string();
    cfg.timeout_secs = 5;
    cfg.conflict_keys.insert("teams".to_string(), "id".to_string());
    cfg
}

fn row(pairs: &[(&str, SqlValue)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn int(i: i64) -> SqlValue {
    SqlValue::Number(Number::from(i))
}

#[test]
fn test_upsert_posts_json_rows_with_backend_headers() {
    let (url, backend) = one_shot_backend("201 Created", "");
    let mut sink = RestSink::new(&rest_config(&url)).expect("rest sink");

    let rows = vec![
        row(&[("id", int(1)), ("name", SqlValue::Text("A".to_string()))]),
        row(&[("id", int(2))]),
    ];
    let written = sink.upsert("teams", &rows).expect("upsert");
    let seen = backend.join().expect("backend thread");

    assert_eq!(written, 2);
    assert!(seen.request_line.starts_with("POST /rest/v1/teams?"));
    assert!(seen.request_line.contains("on_conflict=id"));
    assert!(seen.request_line.contains("columns=id%2Cname"));
    assert!(seen.headers.contains(&"apikey: k".to_string()));
    assert!(seen.headers.contains(&"authorization: bearer k".to_string()));
    assert!(
        seen.headers
            .contains(&"content-type: application/json".to_string())
    );
    assert!(seen.headers.contains(
        &"prefer: resolution=merge-duplicates,missing=default,return=minimal".to_string()
    ));
    assert_eq!(seen.body, r#"[{"id":1,"name":"A"},{"id":2}]"#);
}

#[test]
fn test_uniform_rows_send_no_columns_parameter() {
    let (url, backend) = one_shot_backend("201 Created", "");
    let mut sink = RestSink::new(&rest_config(&url)).expect("rest sink");

    let rows = vec![row(&[("id", int(1))]), row(&[("id", int(2))])];
    sink.upsert("events", &rows).expect("upsert");
    let seen = backend.join().expect("backend thread");

    assert!(seen.request_line.starts_with("POST /rest/v1/events "));
    assert!(!seen.request_line.contains("on_conflict"));
    assert!(!seen.request_line.contains("columns="));
}

#[test]
fn test_rejected_chunk_becomes_upsert_error() {
    let (url, backend) = one_shot_backend(
        "409 Conflict",
        r#"{"message":"duplicate key value violates unique constraint"}"#,
    );
    let mut sink = RestSink::new(&rest_config(&url)).expect("rest sink");

    let err = sink
        .upsert("teams", &[row(&[("id", int(1))])])
        .expect_err("409 must fail");
    backend.join().expect("backend thread");

    match err {
        AppError::Upsert { table, message } => {
            assert_eq!(table, "teams");
            assert!(message.contains("409"));
            assert!(message.contains("duplicate key"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
