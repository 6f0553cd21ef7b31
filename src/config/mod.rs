//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! SassOptions (builder, or TOML file via loader.rs)
//!     → validation.rs (semantic checks, all errors reported)
//!     → settings.rs (resolved roots, engines, log hook)
//!     → Arc<Settings> (immutable, shared by every request)
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once built; a new middleware means a new value
//! - All option fields have defaults so only `src` is required
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod settings;
pub mod validation;

pub use loader::{load_config, read_config, ConfigError};
pub use schema::{Browsers, Extname, SassOptions, ServeConfig};
pub use settings::Settings;
pub use validation::ValidationError;
