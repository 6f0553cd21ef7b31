//! Request routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → matcher.rs (GET/HEAD and `.css` suffix filter)
//!     → resolver.rs (URL → source file + output file)
//!     → compile subsystem
//! ```
//!
//! # Design Decisions
//! - Only one mapping rule exists: `<prefix>/<rel>.css` ↔ `<src>/<rel><ext>`
//! - Path arithmetic is lexical; nothing touches the filesystem here
//! - Paths that escape the roots via `..` are not rejected

pub mod matcher;
pub mod resolver;

pub use matcher::{stylesheet_matcher, Matcher};
pub use resolver::{resolve, ResolvedPaths};
