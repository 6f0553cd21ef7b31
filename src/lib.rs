//! On-demand Sass/SCSS compilation middleware for axum.
//!
//! A request for `<prefix>/<rel>.css` is answered with freshly compiled CSS
//! whenever `<src>/<rel>.scss` (or `.sass`) is newer than the cached
//! `<css>/<rel>.css`. Everything else, including up-to-date stylesheets and
//! failed compiles, falls through to the next handler.

pub mod compile;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod routing;

pub use compile::{Autoprefixer, CompileResult, PostProcessor, Preprocessor, Rendered, RenderOptions};
pub use config::{ConfigError, SassOptions, ServeConfig, Settings};
pub use error::Error;
pub use http::{sass_middleware, SassMiddleware, SassMiddlewareBuilder};
pub use observability::{LogHook, LogRecord};
