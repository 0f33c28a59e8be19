//! Error types for Crowdscape

use thiserror::Error;

/// The main error type for Crowdscape operations
#[derive(Debug, Error)]
pub enum CrowdscapeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Limit reached: {what} is capped at {max}")]
    LimitReached { what: String, max: usize },

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Crowdscape operations
pub type Result<T> = std::result::Result<T, CrowdscapeError>;

impl From<toml::de::Error> for CrowdscapeError {
    fn from(err: toml::de::Error) -> Self {
        CrowdscapeError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for CrowdscapeError {
    fn from(err: toml::ser::Error) -> Self {
        CrowdscapeError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_message_names_the_cap() {
        let err = CrowdscapeError::LimitReached {
            what: "scenarios".into(),
            max: 4,
        };
        assert_eq!(err.to_string(), "Limit reached: scenarios is capped at 4");
    }

    #[test]
    fn toml_errors_convert() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let err: CrowdscapeError = parsed.unwrap_err().into();
        assert!(matches!(err, CrowdscapeError::TomlParseError(_)));
    }
}
