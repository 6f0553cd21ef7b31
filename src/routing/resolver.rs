//! Stylesheet URL → filesystem path translation.
//!
//! A request for `<prefix>/<rel>.css` maps to `<src_root>/<rel><ext>` for the
//! source and `<css_root>/<rel>.css` for the compiled output. The remainder is
//! the POSIX relative path from the prefix to the request path, so a request
//! outside the prefix produces leading `..` segments.

use std::path::{Component, Path, PathBuf};

use crate::config::schema::Extname;
use crate::config::settings::Settings;

const CSS_SUFFIX: &str = ".css";

/// Source and output locations for one stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub source: PathBuf,
    pub output: PathBuf,
}

/// Borrowed view of the settings the mapping depends on.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    prefix: &'a str,
    src_root: &'a Path,
    css_root: &'a Path,
    extname: Extname,
}

impl<'a> PathResolver<'a> {
    pub fn new(prefix: &'a str, src_root: &'a Path, css_root: &'a Path, extname: Extname) -> Self {
        Self {
            prefix,
            src_root,
            css_root,
            extname,
        }
    }

    pub fn from_settings(settings: &'a Settings) -> Self {
        Self::new(
            &settings.prefix,
            &settings.src_root,
            &settings.css_root,
            settings.extname,
        )
    }

    /// Map a request path (no query string) to its source and output files.
    pub fn resolve(&self, request_path: &str) -> ResolvedPaths {
        let rel = relative(self.prefix, request_path);
        let source_rel = match rel.strip_suffix(CSS_SUFFIX) {
            Some(stem) => format!("{stem}{}", self.extname),
            None => rel.clone(),
        };

        ResolvedPaths {
            source: lexical_join(self.src_root, &source_rel),
            output: lexical_join(self.css_root, &rel),
        }
    }

    /// Output path for a source file found under the source root.
    ///
    /// Returns `None` for files outside the root or without the configured
    /// extension.
    pub fn output_for_source(&self, source: &Path) -> Option<PathBuf> {
        let rel = source.strip_prefix(self.src_root).ok()?;
        let name = rel.file_name()?.to_str()?;
        let stem = name.strip_suffix(self.extname.as_str())?;
        let css_name = format!("{stem}{CSS_SUFFIX}");
        Some(self.css_root.join(rel.with_file_name(css_name)))
    }
}

/// Resolve `request_path` against `settings`.
pub fn resolve(request_path: &str, settings: &Settings) -> ResolvedPaths {
    PathResolver::from_settings(settings).resolve(request_path)
}

/// Normalize a URL prefix to an absolute, slash-led path without a trailing
/// slash (`"styles/"` → `"/styles"`, `""` → `"/"`).
pub fn normalize_prefix(prefix: &str) -> String {
    format!("/{}", segments(prefix).join("/"))
}

/// Split a URL path into normalized segments, resolving `.` and `..`.
fn segments(path: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            s => out.push(s),
        }
    }
    out
}

/// POSIX relative path from `from` to `to`, both treated as absolute.
fn relative(from: &str, to: &str) -> String {
    let from = segments(from);
    let to = segments(to);
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts = vec![".."; from.len() - common];
    parts.extend_from_slice(&to[common..]);
    parts.join("/")
}

/// Join `rel` onto `root`, collapsing `.` and `..` lexically.
fn lexical_join(root: &Path, rel: &str) -> PathBuf {
    let mut out = PathBuf::new();
    for component in root.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            c => out.push(c.as_os_str()),
        }
    }
    for segment in rel.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            s => out.push(s),
        }
    }
    out
}
