//! Configuration validation.
//!
//! # Responsibilities
//! - Require a non-empty source root
//! - Restrict the extension to the two recognized dialects
//! - Reject browserslist queries the prefixer cannot resolve
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SassOptions → Result<(), Vec<ValidationError>>
//! - Runs before the middleware is constructed

use lightningcss::targets::Browsers as TargetBrowsers;
use thiserror::Error;

use crate::config::schema::{Extname, SassOptions};

/// A single semantic problem with the options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required src")]
    MissingSource,

    #[error("the extname is '.scss' or '.sass', got '{0}'")]
    InvalidExtname(String),

    #[error("invalid browsers query: {0}")]
    InvalidBrowsers(String),
}

/// Check `options` and report every problem found.
pub fn validate_options(options: &SassOptions) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match &options.src {
        Some(src) if !src.as_os_str().is_empty() => {}
        _ => errors.push(ValidationError::MissingSource),
    }

    if let Some(extname) = &options.extname {
        if Extname::parse(extname).is_none() {
            errors.push(ValidationError::InvalidExtname(extname.clone()));
        }
    }

    if let Some(browsers) = &options.browsers {
        if let Err(e) = TargetBrowsers::from_browserslist(browsers.queries()) {
            errors.push(ValidationError::InvalidBrowsers(e.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
