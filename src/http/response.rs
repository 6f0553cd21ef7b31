//! Stylesheet response construction.
//!
//! # Responsibilities
//! - Set `Content-Type` and `Cache-Control` on compiled output
//! - Gzip the body when enabled and persist the `.gz` variant
//!
//! # Design Decisions
//! - Compression happens once; the same bytes feed the body and the file
//! - The `.gz` write is detached like every other cache write

use std::path::Path;

use axum::body::{Body, Bytes};
use axum::http::header::{CACHE_CONTROL, CONTENT_ENCODING, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::response::Response;

use crate::compile::persist;
use crate::config::settings::Settings;
use crate::error::{Error, Result};

pub const CSS_CONTENT_TYPE: &str = "text/css;charset=utf-8";

/// Build the response for freshly compiled `css` destined for `output`.
pub fn stylesheet_response(css: String, output: &Path, settings: &Settings) -> Result<Response> {
    let body = if settings.gzip {
        let gz_path = persist::gz_path(output);
        let compressed = Bytes::from(
            persist::gzip(css.as_bytes()).map_err(|e| Error::io(&gz_path, e))?,
        );
        persist::spawn_write(gz_path, compressed.clone());
        Body::from(compressed)
    } else {
        Body::from(css)
    };

    let mut response = Response::new(body);
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CSS_CONTENT_TYPE));
    headers.insert(CACHE_CONTROL, settings.cache_control.clone());
    if settings.gzip {
        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
    }
    Ok(response)
}
