//! Configuration schema definitions.
//!
//! [`SassOptions`] mirrors the middleware factory options. [`ServeConfig`]
//! wraps them for the `sass-serve` binary. All types derive Serde traits for
//! deserialization from TOML files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Browserslist queries used when no explicit plugin list is supplied.
pub const DEFAULT_BROWSERS: [&str; 2] = ["last 2 versions", "> 2%"];

/// Middleware factory options.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SassOptions {
    /// Source root holding `.scss`/`.sass` files (required).
    pub src: Option<PathBuf>,

    /// Output root for compiled CSS. Defaults to `src`.
    pub css: Option<PathBuf>,

    /// Compile every source file once at startup.
    pub init: bool,

    /// Gzip responses and write `.css.gz` next to the output.
    pub gzip: bool,

    /// Recompile on every request regardless of mtimes.
    pub force: bool,

    /// `Cache-Control: max-age` in seconds.
    pub max_age: u64,

    /// Source extension, `.scss` (default) or `.sass`.
    pub extname: Option<String>,

    /// Browserslist query for the default vendor-prefix pass.
    pub browsers: Option<Browsers>,

    /// Emit `.css.map` files when the engine produces a map.
    pub source_map: bool,

    /// URL prefix the stylesheets are served under. Defaults to `/`.
    pub prefix: Option<String>,
}

impl SassOptions {
    /// Options with only the source root set.
    pub fn new(src: impl Into<PathBuf>) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::default()
        }
    }
}

/// A single browserslist query string or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Browsers {
    One(String),
    Many(Vec<String>),
}

impl Browsers {
    pub fn queries(&self) -> Vec<String> {
        match self {
            Browsers::One(q) => vec![q.clone()],
            Browsers::Many(qs) => qs.clone(),
        }
    }
}

impl Default for Browsers {
    fn default() -> Self {
        Browsers::Many(DEFAULT_BROWSERS.iter().map(|q| q.to_string()).collect())
    }
}

/// The two recognized source dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extname {
    #[default]
    Scss,
    Sass,
}

impl Extname {
    /// Parse `.scss` or `.sass`; anything else is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            ".scss" => Some(Extname::Scss),
            ".sass" => Some(Extname::Sass),
            _ => None,
        }
    }

    /// Extension including the leading dot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Extname::Scss => ".scss",
            Extname::Sass => ".sass",
        }
    }
}

impl fmt::Display for Extname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root configuration for the `sass-serve` binary.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServeConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Middleware options.
    pub sass: SassOptions,

    /// Static file fallback.
    pub static_files: StaticFilesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Static file server the middleware falls through to.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served for everything the middleware does not answer.
    /// Defaults to the CSS output root.
    pub root: Option<PathBuf>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
