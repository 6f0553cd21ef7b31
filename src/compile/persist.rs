//! Detached persistence of compiled artifacts.
//!
//! Writes go to a sibling temp file that is renamed into place, so a reader
//! never observes a half-written stylesheet. The returned handles may be
//! dropped; failures are traced and otherwise swallowed.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use flate2::write::GzEncoder;
use flate2::Compression;
use tokio::task::JoinHandle;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `<output>.map`
pub fn map_path(output: &Path) -> PathBuf {
    with_suffix(output, ".map")
}

/// `<output>.gz`
pub fn gz_path(output: &Path) -> PathBuf {
    with_suffix(output, ".gz")
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Write `contents` to `path` in a background task.
pub fn spawn_write<C>(path: PathBuf, contents: C) -> JoinHandle<()>
where
    C: AsRef<[u8]> + Send + 'static,
{
    tokio::spawn(async move {
        match write_atomic(&path, contents.as_ref()).await {
            Ok(()) => tracing::trace!(path = %path.display(), "Persisted"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to persist file"),
        }
    })
}

async fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let id = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp = with_suffix(path, &format!(".{}.{id}.tmp", std::process::id()));

    if let Err(e) = tokio::fs::write(&tmp, contents).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}

/// Gzip `content` at maximum compression.
pub fn gzip(content: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(content)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_suffix_paths() {
        let output = Path::new("/srv/public/app.css");
        assert_eq!(map_path(output), PathBuf::from("/srv/public/app.css.map"));
        assert_eq!(gz_path(output), PathBuf::from("/srv/public/app.css.gz"));
    }

    #[test]
    fn test_gzip_decodes() {
        let compressed = gzip(b"body{color:red}").unwrap();
        let mut decoded = String::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "body{color:red}");
    }

    #[tokio::test]
    async fn test_spawn_write_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.css");
        std::fs::write(&path, "old").unwrap();

        spawn_write(path.clone(), "new".to_string()).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn test_spawn_write_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.css");

        spawn_write(path.clone(), b"x".to_vec()).await.unwrap();
        assert!(!path.exists());
    }
}
