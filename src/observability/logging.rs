//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for the binary
//! - Define the log hook handed every resolved request and failure
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via config and `RUST_LOG`

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings::Settings;
use crate::error::Error;

/// What the middleware knew when it reported a step.
#[derive(Clone, Copy)]
pub struct LogRecord<'a> {
    /// Active settings.
    pub settings: &'a Settings,
    /// Resolved source file.
    pub source: &'a Path,
    /// Resolved output file.
    pub output: &'a Path,
}

impl<'a> LogRecord<'a> {
    pub fn new(settings: &'a Settings, source: &'a Path, output: &'a Path) -> Self {
        Self {
            settings,
            source,
            output,
        }
    }
}

impl fmt::Debug for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecord")
            .field("source", &self.source)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// User callback invoked before each compile decision and on every failure.
///
/// The request is `None` for warm-cache compiles.
pub type LogHook =
    Arc<dyn Fn(Option<&Request<Body>>, &LogRecord<'_>, Option<&Error>) + Send + Sync>;

/// Call the configured hook, if any.
pub(crate) fn emit(request: Option<&Request<Body>>, record: &LogRecord<'_>, error: Option<&Error>) {
    if let Some(hook) = &record.settings.log {
        hook(request, record, error);
    }
}

/// Install the global subscriber: `RUST_LOG` wins over `default_directive`.
pub fn init_tracing(default_directive: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
