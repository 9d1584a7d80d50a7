//! Language service errors
//!
//! Query results never fail: a missing declaration, template or match is a
//! `None` or an empty set, and selector parse failures are logged and read as
//! "no match". Errors only come from decoding configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LanguageServiceError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LanguageServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(content: &str) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(content)?)
    }

    #[test]
    fn should_convert_json_errors() {
        let err = decode("{").unwrap_err();
        assert!(matches!(err, LanguageServiceError::Json(_)));
    }

    #[test]
    fn should_describe_config_errors() {
        let err = LanguageServiceError::Config("configuration document is empty".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: configuration document is empty"
        );
    }
}
