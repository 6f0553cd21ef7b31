//! Cache invalidation decision.
//!
//! Compiled output is stale when it is missing or strictly older than its
//! source. A failed stat on either side counts as "no timestamp".

use std::path::Path;
use std::time::SystemTime;

use crate::error::{Error, Result};

/// Decide whether `source` has to be (re)compiled into `output`.
///
/// Fails with [`Error::SourceNotFound`] when the source cannot be stat'ed.
/// `force` wins over timestamps but not over a missing source.
pub async fn should_compile(source: &Path, output: &Path, force: bool) -> Result<bool> {
    let (source_mtime, output_mtime) = tokio::join!(modified(source), modified(output));

    let Some(source_mtime) = source_mtime else {
        return Err(Error::SourceNotFound(source.to_path_buf()));
    };

    if force {
        return Ok(true);
    }

    Ok(match output_mtime {
        Some(output_mtime) => source_mtime > output_mtime,
        None => true,
    })
}

async fn modified(path: &Path) -> Option<SystemTime> {
    let metadata = tokio::fs::metadata(path).await.ok()?;
    metadata.modified().ok()
}
