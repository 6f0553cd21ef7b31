//! On-demand stylesheet compilation middleware.
//!
//! Wire it with `axum::middleware::from_fn_with_state`:
//!
//! ```rust,no_run
//! use axum::{middleware, Router};
//! use sass_middleware::{sass_middleware, SassMiddleware, SassOptions};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let sass = SassMiddleware::new(SassOptions::new("assets/scss"))?;
//! let app: Router = Router::new()
//!     .layer(middleware::from_fn_with_state(sass, sass_middleware));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::Request as HttpRequest;
use axum::middleware::Next;
use axum::response::Response;

use crate::compile::compiler::compile;
use crate::compile::engine::Preprocessor;
use crate::compile::postprocess::PostProcessor;
use crate::compile::staleness::should_compile;
use crate::compile::warm::spawn_warm_cache;
use crate::config::loader::ConfigError;
use crate::config::schema::SassOptions;
use crate::config::settings::{Overrides, Settings};
use crate::error::{Error, Result};
use crate::http::response::stylesheet_response;
use crate::observability::logging::{self, LogRecord};
use crate::routing::matcher::{stylesheet_matcher, AndMatcher, Matcher};
use crate::routing::resolver::{resolve, ResolvedPaths};

/// The configured middleware. Cheap to clone; all clones share one
/// immutable [`Settings`].
#[derive(Clone, Debug)]
pub struct SassMiddleware {
    settings: Arc<Settings>,
    matcher: Arc<AndMatcher>,
}

impl SassMiddleware {
    /// Build with default engine, plugins and no log hook.
    pub fn new(options: SassOptions) -> Result<Self, ConfigError> {
        Self::builder(options).build()
    }

    pub fn builder(options: SassOptions) -> SassMiddlewareBuilder {
        SassMiddlewareBuilder {
            options,
            overrides: Overrides::default(),
        }
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// Serve `request` if it names a stale stylesheet, otherwise run `next`.
    pub async fn handle(&self, request: Request, next: Next) -> Response {
        if !self.matcher.matches(&request) {
            return next.run(request).await;
        }

        let paths = resolve(request.uri().path(), &self.settings);
        let record = LogRecord::new(&self.settings, &paths.source, &paths.output);
        tracing::debug!(
            path = %request.uri().path(),
            source = %paths.source.display(),
            output = %paths.output.display(),
            "Resolved stylesheet request"
        );
        logging::emit(Some(&request), &record, None);

        match self.compile_if_stale(&paths).await {
            Ok(Some(response)) => response,
            Ok(None) => {
                tracing::debug!(output = %paths.output.display(), "Stylesheet up to date");
                next.run(request).await
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::debug!(error = %e, "No stylesheet source, passing through");
                } else {
                    tracing::warn!(error = %e, "Stylesheet compile failed, passing through");
                }
                logging::emit(Some(&request), &record, Some(&e));
                next.run(request).await
            }
        }
    }

    async fn compile_if_stale(&self, paths: &ResolvedPaths) -> Result<Option<Response>> {
        if !should_compile(&paths.source, &paths.output, self.settings.force).await? {
            return Ok(None);
        }

        let result = compile(&paths.source, &paths.output, &self.settings).await?;
        stylesheet_response(result.css, &paths.output, &self.settings).map(Some)
    }
}

/// Axum middleware function; state is the [`SassMiddleware`].
pub async fn sass_middleware(
    State(sass): State<SassMiddleware>,
    request: Request,
    next: Next,
) -> Response {
    sass.handle(request, next).await
}

/// Factory for [`SassMiddleware`] with engine, plugin and log overrides.
#[must_use]
pub struct SassMiddlewareBuilder {
    options: SassOptions,
    overrides: Overrides,
}

impl SassMiddlewareBuilder {
    /// Replace the grass engine.
    pub fn preprocessor(mut self, preprocessor: impl Preprocessor + 'static) -> Self {
        self.overrides.preprocessor = Some(Arc::new(preprocessor));
        self
    }

    /// Replace the default vendor-prefix pass with `plugins`, run in order.
    pub fn plugins(mut self, plugins: Vec<Arc<dyn PostProcessor>>) -> Self {
        self.overrides.plugins = Some(plugins);
        self
    }

    /// Report every resolved request and every failure to `hook`.
    pub fn log<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<&HttpRequest<Body>>, &LogRecord<'_>, Option<&Error>) + Send + Sync + 'static,
    {
        self.overrides.log = Some(Arc::new(hook));
        self
    }

    /// Validate the options and, when `init` is set, start the warm-cache
    /// walk on the current Tokio runtime without awaiting it.
    pub fn build(self) -> Result<SassMiddleware, ConfigError> {
        let settings = Arc::new(Settings::build(self.options, self.overrides)?);

        if settings.init {
            let handle =
                tokio::runtime::Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;
            drop(spawn_warm_cache(&handle, Arc::clone(&settings)));
        }

        tracing::debug!(settings = ?settings, "Sass middleware configured");
        Ok(SassMiddleware {
            settings,
            matcher: Arc::new(stylesheet_matcher()),
        })
    }
}
