//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Request
//!     → middleware.rs (GET/HEAD *.css filter, resolve, staleness, compile)
//!         → response.rs (headers, optional gzip body + .gz file)
//!     → otherwise Next (static files in sass-serve)
//! ```

pub mod middleware;
pub mod response;
pub mod server;

pub use middleware::{sass_middleware, SassMiddleware, SassMiddlewareBuilder};
pub use server::build_router;
