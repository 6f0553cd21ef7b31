//! Shared utilities for middleware integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::{middleware, Router};
use tower::ServiceExt;

use sass_middleware::compile::GrassPreprocessor;
use sass_middleware::{sass_middleware, Error, LogRecord, Preprocessor, Rendered, RenderOptions, SassMiddleware};

/// Body returned by the fallback handler standing in for "next".
pub const NEXT_BODY: &str = "next handler";

/// A source tree and an output tree inside one temp dir.
pub struct Fixture {
    pub dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn src(&self) -> PathBuf {
        self.dir.path().join("scss")
    }

    pub fn css(&self) -> PathBuf {
        self.dir.path().join("public")
    }

    /// Write a source file under the source root.
    pub fn write_source(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.src().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }
}

/// Router whose fallback marks a request as delegated.
pub fn app(sass: SassMiddleware) -> Router {
    Router::new()
        .fallback(|| async { (StatusCode::NOT_FOUND, NEXT_BODY) })
        .layer(middleware::from_fn_with_state(sass, sass_middleware))
}

pub async fn send(app: &Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// True when the fallback answered.
pub async fn was_delegated(response: Response) -> bool {
    response.status() == StatusCode::NOT_FOUND && body_bytes(response).await == NEXT_BODY.as_bytes()
}

/// Poll until `path` exists; detached writes land eventually.
pub async fn wait_for_file(path: &Path) {
    for _ in 0..250 {
        if path.exists() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("{} never appeared", path.display());
}

/// Set a file's mtime.
pub fn set_mtime(path: &Path, mtime: SystemTime) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

/// grass engine that counts how often it ran.
#[derive(Clone, Default)]
pub struct CountingPreprocessor {
    pub calls: Arc<AtomicUsize>,
}

impl CountingPreprocessor {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Preprocessor for CountingPreprocessor {
    fn render(&self, source: &Path, options: &RenderOptions) -> Result<Rendered, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        GrassPreprocessor.render(source, options)
    }
}

/// One log hook invocation: had a request, source path, error text.
pub type LogEntry = (bool, PathBuf, Option<String>);

/// Collects log hook invocations.
#[derive(Clone, Default)]
pub struct LogSink {
    pub entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogSink {
    pub fn hook(
        &self,
    ) -> impl Fn(Option<&Request<Body>>, &LogRecord<'_>, Option<&Error>) + Send + Sync + 'static {
        let entries = Arc::clone(&self.entries);
        move |req: Option<&Request<Body>>, record: &LogRecord<'_>, err: Option<&Error>| {
            entries.lock().unwrap().push((
                req.is_some(),
                record.source.to_path_buf(),
                err.map(|e| e.to_string()),
            ));
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }
}
