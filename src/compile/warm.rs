//! Warm-cache walk.
//!
//! # Responsibilities
//! - Visit every entry under the source root (iteratively, no recursion)
//! - Compile each file carrying the configured extension in its own task
//! - Write the gzip variant next to the output when gzip is enabled
//!
//! # Design Decisions
//! - A failing file or unreadable directory never stops the walk
//! - Traversal order is unspecified
//! - Started detached from the middleware factory; nothing awaits it there

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::compile::compiler::compile;
use crate::compile::persist;
use crate::config::settings::Settings;
use crate::error::{Error, Result};
use crate::observability::logging::{self, LogRecord};
use crate::routing::resolver::PathResolver;

/// Outcome counts of one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarmSummary {
    pub compiled: usize,
    pub failed: usize,
}

/// Compile every source file under `settings.src_root`.
pub async fn warm_cache(settings: Arc<Settings>) -> WarmSummary {
    tracing::info!(root = %settings.src_root.display(), "Warm-cache walk starting");

    let mut tasks = JoinSet::new();
    let mut pending = vec![settings.src_root.clone()];

    while let Some(dir) = pending.pop() {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                continue;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Directory listing interrupted");
                    break;
                }
            };

            let path = entry.path();
            let is_dir = match entry.file_type().await {
                Ok(file_type) => file_type.is_dir(),
                Err(_) => continue,
            };
            if is_dir {
                pending.push(path);
                continue;
            }

            let Some(output) = PathResolver::from_settings(&settings).output_for_source(&path) else {
                continue;
            };
            let settings = Arc::clone(&settings);
            tasks.spawn(async move {
                let result = compile_one(&path, &output, &settings).await;
                if let Err(e) = &result {
                    tracing::warn!(source = %path.display(), error = %e, "Warm-cache compile failed");
                }
                logging::emit(
                    None,
                    &LogRecord::new(&settings, &path, &output),
                    result.as_ref().err(),
                );
                result.is_ok()
            });
        }
    }

    let mut summary = WarmSummary::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(true) => summary.compiled += 1,
            _ => summary.failed += 1,
        }
    }

    tracing::info!(
        compiled = summary.compiled,
        failed = summary.failed,
        "Warm-cache walk finished"
    );
    summary
}

async fn compile_one(source: &Path, output: &Path, settings: &Settings) -> Result<()> {
    let result = compile(source, output, settings).await?;

    if settings.gzip {
        let compressed = persist::gzip(result.css.as_bytes())
            .map_err(|e| Error::io(persist::gz_path(output), e))?;
        persist::spawn_write(persist::gz_path(output), compressed);
    }
    Ok(())
}

/// Start the walk in the background on the current runtime.
pub(crate) fn spawn_warm_cache(
    handle: &tokio::runtime::Handle,
    settings: Arc<Settings>,
) -> tokio::task::JoinHandle<WarmSummary> {
    handle.spawn(warm_cache(settings))
}
