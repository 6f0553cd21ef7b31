//! Stylesheet compilation subsystem.
//!
//! # Data Flow
//! ```text
//! (source, output) paths
//!     → staleness.rs (stat both, decide whether to compile)
//!     → compiler.rs
//!         → engine.rs (Sass/SCSS → compressed CSS, optional map)
//!         → postprocess.rs (ordered CSS transforms, vendor prefixes)
//!         → persist.rs (detached writes of .css / .css.map / .css.gz)
//!
//! At startup (init = true):
//!     warm.rs walks the source root and compiles every file
//! ```
//!
//! # Design Decisions
//! - Engines are CPU-bound and run on the blocking pool
//! - Disk writes are never awaited by the request path
//! - No de-duplication: concurrent requests may compile the same file

pub mod compiler;
pub mod engine;
pub mod persist;
pub mod postprocess;
pub mod staleness;
pub mod warm;

pub use compiler::{compile, CompileResult};
pub use engine::{GrassPreprocessor, Preprocessor, RenderOptions, Rendered};
pub use postprocess::{Autoprefixer, PostProcessor};
pub use staleness::should_compile;
pub use warm::{warm_cache, WarmSummary};
