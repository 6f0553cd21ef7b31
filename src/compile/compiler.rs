//! Compile one source file and persist the result.

use std::path::Path;

use crate::compile::engine::RenderOptions;
use crate::compile::persist;
use crate::compile::postprocess::run_pipeline;
use crate::config::settings::Settings;
use crate::error::{Error, Result};

/// Final stylesheet content of one compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    pub css: String,
    pub map: Option<String>,
}

/// Compile `source` into `output`.
///
/// The returned CSS is final; the `.css` and `.css.map` writes run in
/// detached tasks and may not have landed when this returns.
pub async fn compile(source: &Path, output: &Path, settings: &Settings) -> Result<CompileResult> {
    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }

    let preprocessor = settings.preprocessor.clone();
    let source_path = source.to_path_buf();
    let options = RenderOptions {
        source_map: settings.source_map,
    };
    let rendered = tokio::task::spawn_blocking(move || preprocessor.render(&source_path, &options))
        .await
        .map_err(|e| Error::Task(e.to_string()))??;

    if let Some(map) = &rendered.map {
        persist::spawn_write(persist::map_path(output), map.clone());
    }

    let plugins = settings.plugins.clone();
    let compiled = rendered.css;
    let css = tokio::task::spawn_blocking(move || run_pipeline(compiled, &plugins))
        .await
        .map_err(|e| Error::Task(e.to_string()))??;

    persist::spawn_write(output.to_path_buf(), css.clone());

    tracing::info!(
        source = %source.display(),
        output = %output.display(),
        bytes = css.len(),
        "Compiled stylesheet"
    );

    Ok(CompileResult {
        css,
        map: rendered.map,
    })
}
