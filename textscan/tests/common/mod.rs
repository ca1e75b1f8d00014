// Shared helpers for router-level tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use axum::body::Body;
use axum::http::Request;
use textscan::api::{create_router, AppState};
use textscan::config::{Config, OcrConfig, ServerConfig};
use textscan::error::{Result, TextScanError};
use textscan::ocr::{Block, Document, Geometry, Line, OcrEngine, Page, Word};

pub const BOUNDARY: &str = "textscan-test-boundary";

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Engine returning a fixed document and counting its invocations.
pub struct StubEngine {
    document: Document,
    calls: AtomicUsize,
    delete_input: bool,
}

impl StubEngine {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            calls: AtomicUsize::new(0),
            delete_input: false,
        }
    }

    /// Removes the temp file itself, so the gateway's own cleanup fails.
    pub fn deleting_input(document: Document) -> Self {
        Self {
            delete_input: true,
            ..Self::new(document)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrEngine for StubEngine {
    fn recognize(&self, path: &Path) -> Result<Document> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delete_input {
            std::fs::remove_file(path)?;
        }
        Ok(self.document.clone())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

pub struct FailingEngine;

impl OcrEngine for FailingEngine {
    fn recognize(&self, _path: &Path) -> Result<Document> {
        Err(TextScanError::Ocr("cannot identify image file".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

pub fn test_config(temp_dir: &Path) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_upload_bytes: 1024 * 1024,
        },
        ocr: OcrConfig {
            temp_dir: temp_dir.to_path_buf(),
            ..OcrConfig::default()
        },
    }
}

pub fn test_app(temp_dir: &Path, engine: Arc<dyn OcrEngine>) -> axum::Router {
    init_test_logger();
    create_router(AppState::new(test_config(temp_dir), engine))
}

fn line(words: &[(&str, f64)]) -> Line {
    Line::new(words.iter().map(|(v, c)| Word::new(*v, *c)).collect())
}

/// One page, one block, lines "Hello" (0.9) and "World" (0.8).
pub fn hello_world() -> Document {
    Document::new(vec![Page::new(
        (640, 480),
        vec![Block::new(
            Geometry::new(0.1, 0.2, 0.6, 0.4),
            vec![line(&[("Hello", 0.9)]), line(&[("World", 0.8)])],
        )],
    )])
}

/// Two pages with several blocks, including one without words.
pub fn multi_page() -> Document {
    Document::new(vec![
        Page::new(
            (100, 100),
            vec![
                Block::new(
                    Geometry::new(0.0, 0.0, 1.0, 0.5),
                    vec![line(&[("Total", 0.99), ("due", 0.97)]), line(&[("$12.00", 0.8)])],
                ),
                Block::new(Geometry::new(0.0, 0.5, 1.0, 0.6), vec![Line::default()]),
            ],
        ),
        Page::new(
            (100, 100),
            vec![Block::new(
                Geometry::new(0.2, 0.2, 0.4, 0.3),
                vec![line(&[("Thanks", 0.6)])],
            )],
        ),
    ])
}

/// Build a `multipart/form-data` body with a single `file` part.
pub fn multipart_body(file_name: Option<&str>, content_type: Option<&str>, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    match file_name {
        Some(name) => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n")
                .as_bytes(),
        ),
        None => body.extend_from_slice(b"Content-Disposition: form-data; name=\"file\"\r\n"),
    }
    if let Some(ct) = content_type {
        body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn scan_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}
