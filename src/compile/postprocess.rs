//! Post-processing of compiled CSS.
//!
//! The pipeline is an ordered list of [`PostProcessor`]s; each receives the
//! previous one's output. The default list holds a single [`Autoprefixer`].

use std::sync::Arc;

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};

use crate::error::{Error, Result};

/// A CSS text transform.
pub trait PostProcessor: Send + Sync {
    fn process(&self, css: &str) -> Result<String>;
}

impl<F> PostProcessor for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn process(&self, css: &str) -> Result<String> {
        self(css)
    }
}

/// Adds the vendor prefixes required by a browserslist query.
#[derive(Debug, Clone)]
pub struct Autoprefixer {
    targets: Targets,
}

impl Autoprefixer {
    pub fn new<S: AsRef<str>>(queries: &[S]) -> Result<Self> {
        let browsers = Browsers::from_browserslist(queries.iter().map(|q| q.as_ref()))
            .map_err(|e| Error::PostProcess(e.to_string()))?;

        Ok(Self {
            targets: Targets {
                browsers,
                ..Targets::default()
            },
        })
    }
}

impl PostProcessor for Autoprefixer {
    fn process(&self, css: &str) -> Result<String> {
        let mut sheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| Error::PostProcess(e.to_string()))?;

        sheet
            .minify(MinifyOptions {
                targets: self.targets.clone(),
                ..MinifyOptions::default()
            })
            .map_err(|e| Error::PostProcess(e.to_string()))?;

        let output = sheet
            .to_css(PrinterOptions {
                minify: true,
                targets: self.targets.clone(),
                ..PrinterOptions::default()
            })
            .map_err(|e| Error::PostProcess(e.to_string()))?;

        Ok(output.code)
    }
}

/// Run `css` through every processor in order.
pub fn run_pipeline(css: String, plugins: &[Arc<dyn PostProcessor>]) -> Result<String> {
    plugins
        .iter()
        .try_fold(css, |css, plugin| plugin.process(&css))
}
