//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ServeConfig;
use crate::config::validation::{validate_options, ValidationError};

/// Error type for configuration loading and middleware construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("invalid header value: {0}")]
    Header(#[from] axum::http::header::InvalidHeaderValue),

    #[error("warm-cache compilation requires a running Tokio runtime")]
    NoRuntime,
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServeConfig, ConfigError> {
    let config = read_config(path)?;
    validate_options(&config.sass).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load configuration without semantic checks, for callers that layer more
/// options on top before building the middleware.
pub fn read_config(path: &Path) -> Result<ServeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServeConfig, ConfigError> {
    let config: ServeConfig = toml::from_str(content)?;

    validate_options(&config.sass).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_config() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "0.0.0.0:8080"

            [sass]
            src = "assets/scss"
            css = "public"
            prefix = "/styles"
            extname = ".sass"
            max_age = 3600
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.sass.prefix.as_deref(), Some("/styles"));
        assert_eq!(config.sass.max_age, 3600);
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_config("[sass]\nextname = \".css\"").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("required src"));
        assert!(message.contains("'.css'"));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_config("[sass\nsrc = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
