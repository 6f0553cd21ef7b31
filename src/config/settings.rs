//! Validated, immutable middleware settings.

use axum::http::HeaderValue;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::compile::engine::{GrassPreprocessor, Preprocessor};
use crate::compile::postprocess::{Autoprefixer, PostProcessor};
use crate::config::loader::ConfigError;
use crate::config::schema::{Extname, SassOptions};
use crate::config::validation::{validate_options, ValidationError};
use crate::observability::logging::LogHook;
use crate::routing::resolver::normalize_prefix;

/// Builder-only overrides that cannot come from a config file.
#[derive(Default, Clone)]
pub(crate) struct Overrides {
    pub preprocessor: Option<Arc<dyn Preprocessor>>,
    pub plugins: Option<Vec<Arc<dyn PostProcessor>>>,
    pub log: Option<LogHook>,
}

/// Settings shared by every request once the middleware is built.
pub struct Settings {
    /// Absolute source root.
    pub src_root: PathBuf,
    /// Absolute output root.
    pub css_root: PathBuf,
    /// Normalized URL prefix, always starting with `/`.
    pub prefix: String,
    pub extname: Extname,
    pub init: bool,
    pub gzip: bool,
    pub force: bool,
    pub source_map: bool,
    pub max_age: u64,
    pub browsers: Vec<String>,
    pub(crate) cache_control: HeaderValue,
    pub(crate) preprocessor: Arc<dyn Preprocessor>,
    pub(crate) plugins: Vec<Arc<dyn PostProcessor>>,
    pub(crate) log: Option<LogHook>,
}

impl Settings {
    /// Validate `options` and resolve them into settings.
    pub fn from_options(options: SassOptions) -> Result<Self, ConfigError> {
        Self::build(options, Overrides::default())
    }

    pub(crate) fn build(options: SassOptions, overrides: Overrides) -> Result<Self, ConfigError> {
        validate_options(&options).map_err(ConfigError::Validation)?;

        let src = options
            .src
            .ok_or_else(|| ConfigError::Validation(vec![ValidationError::MissingSource]))?;
        let src_root = std::path::absolute(&src)?;
        let css_root = match options.css {
            Some(css) => std::path::absolute(css)?,
            None => src_root.clone(),
        };

        let extname = match options.extname.as_deref() {
            Some(value) => Extname::parse(value).ok_or_else(|| {
                ConfigError::Validation(vec![ValidationError::InvalidExtname(value.to_string())])
            })?,
            None => Extname::default(),
        };

        let browsers = options.browsers.unwrap_or_default().queries();
        let plugins = match overrides.plugins {
            Some(plugins) => plugins,
            None => {
                let prefixer = Autoprefixer::new(browsers.as_slice()).map_err(|e| {
                    ConfigError::Validation(vec![ValidationError::InvalidBrowsers(e.to_string())])
                })?;
                vec![Arc::new(prefixer) as Arc<dyn PostProcessor>]
            }
        };

        let cache_control = HeaderValue::try_from(format!("max-age={}", options.max_age))?;

        Ok(Self {
            src_root,
            css_root,
            prefix: normalize_prefix(options.prefix.as_deref().unwrap_or("")),
            extname,
            init: options.init,
            gzip: options.gzip,
            force: options.force,
            source_map: options.source_map,
            max_age: options.max_age,
            browsers,
            cache_control,
            preprocessor: overrides
                .preprocessor
                .unwrap_or_else(|| Arc::new(GrassPreprocessor)),
            plugins,
            log: overrides.log,
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("src_root", &self.src_root)
            .field("css_root", &self.css_root)
            .field("prefix", &self.prefix)
            .field("extname", &self.extname)
            .field("init", &self.init)
            .field("gzip", &self.gzip)
            .field("force", &self.force)
            .field("source_map", &self.source_map)
            .field("max_age", &self.max_age)
            .field("browsers", &self.browsers)
            .field("plugins", &self.plugins.len())
            .field("log", &self.log.is_some())
            .finish()
    }
}
