//! Preprocessor engines.

use std::path::Path;

use crate::error::{Error, Result};

/// Options passed to a preprocessor for one render.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Produce a source map alongside the CSS.
    pub source_map: bool,
}

/// Output of a preprocessor render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub css: String,
    pub map: Option<String>,
}

/// Compiles a style-language source file into compressed CSS.
///
/// Implemented for any `Fn(&Path, &RenderOptions) -> Result<Rendered>` so a
/// closure can stand in for a real engine.
pub trait Preprocessor: Send + Sync {
    fn render(&self, source: &Path, options: &RenderOptions) -> Result<Rendered>;
}

impl<F> Preprocessor for F
where
    F: Fn(&Path, &RenderOptions) -> Result<Rendered> + Send + Sync,
{
    fn render(&self, source: &Path, options: &RenderOptions) -> Result<Rendered> {
        self(source, options)
    }
}

/// Pure-Rust Sass engine.
///
/// The dialect follows the file extension. grass does not emit source maps,
/// so `map` is always `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrassPreprocessor;

impl Preprocessor for GrassPreprocessor {
    fn render(&self, source: &Path, options: &RenderOptions) -> Result<Rendered> {
        if options.source_map {
            tracing::trace!(source = %source.display(), "grass does not produce source maps");
        }

        let opts = grass::Options::default().style(grass::OutputStyle::Compressed);
        let css = grass::from_path(source, &opts).map_err(|e| Error::Compile {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Rendered { css, map: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_grass_compiles_scss_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.scss");
        fs::write(&path, "$c: red;\nbody { p { color: $c; } }\n").unwrap();

        let rendered = GrassPreprocessor
            .render(&path, &RenderOptions::default())
            .unwrap();
        assert_eq!(rendered.css.trim(), "body p{color:red}");
        assert!(rendered.map.is_none());
    }

    #[test]
    fn test_grass_compiles_indented_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.sass");
        fs::write(&path, "body\n  color: blue\n").unwrap();

        let rendered = GrassPreprocessor
            .render(&path, &RenderOptions::default())
            .unwrap();
        assert_eq!(rendered.css.trim(), "body{color:blue}");
    }

    #[test]
    fn test_syntax_error_is_compile_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.scss");
        fs::write(&path, "body { color: red;").unwrap();

        let err = GrassPreprocessor
            .render(&path, &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Compile { .. }));
    }

    #[test]
    fn test_closure_engine() {
        let engine = |_: &Path, opts: &RenderOptions| -> Result<Rendered> {
            Ok(Rendered {
                css: "a{}".into(),
                map: opts.source_map.then(|| "{}".to_string()),
            })
        };
        let rendered = engine
            .render(Path::new("x.scss"), &RenderOptions { source_map: true })
            .unwrap();
        assert_eq!(rendered.map.as_deref(), Some("{}"));
    }
}
