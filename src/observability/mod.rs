//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! middleware / compiler / warm-cache walk produce:
//!     → tracing events (debug: resolve/skip, info: compiled, warn: failures)
//!     → logging.rs LogHook (user callback with settings, paths, error)
//! ```
//!
//! # Design Decisions
//! - The log hook is optional and purely additive to tracing
//! - The subscriber is installed by the binary, never by the library

pub mod logging;

pub use logging::{init_tracing, LogHook, LogRecord};
