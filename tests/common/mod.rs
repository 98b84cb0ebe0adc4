//! Shared helpers for the gateway integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use dungeon_gateway::{Directories, register};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

pub const MULTIPART_BOUNDARY: &str = "----dungeon-test-boundary";

/// A gateway registered on an empty host router, backed by a temporary
/// install tree: `<tmp>/custom_nodes/dungeon/web`, `<tmp>/input`, `<tmp>/output`.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestGateway {
    pub router: Router,
    pub dirs: Directories,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestGateway {
    pub fn new() -> Self {
        Self::with_host_router(Router::new())
    }

    pub fn with_host_router(host_router: Router) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let base = temp_dir.path().join("custom_nodes").join("dungeon");
        let dirs = Directories::from_base(&base);

        std::fs::create_dir_all(&dirs.webroot).expect("Failed to create web root");

        let router = register(host_router, dirs.clone());

        Self {
            router,
            dirs,
            _temp_dir: temp_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        (status, headers, body)
    }

    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, _, body) = self.send(request).await;
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_prompt(&self, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/prompt")
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap();
        self.send_json(request).await
    }

    pub async fn upload(&self, parts: &[MultipartPart<'_>]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/upload/image")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send_json(request).await
    }

    pub fn write_file(&self, path: &Path, contents: &[u8]) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }
}

/// One part of a hand-built multipart/form-data body.
#[allow(dead_code)]
pub struct MultipartPart<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub data: &'a [u8],
}

#[allow(dead_code)]
pub fn multipart_body(parts: &[MultipartPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        let disposition = match part.filename {
            Some(filename) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.name, filename
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name),
        };
        body.extend_from_slice(disposition.as_bytes());
        if part.filename.is_some() {
            body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}
