use std::error::Error;

/// Base trait for all application errors
pub trait ConfchainError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// A parser rejected a value that a source produced.
///
/// Always fatal: an explicitly supplied but malformed value is never
/// silently replaced by a default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ConfchainError for ParseError {
    fn error_code(&self) -> &'static str {
        "INVALID_FORMAT"
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Input is not valid base64: {source}")]
    InvalidBase64 {
        #[from]
        source: base64::DecodeError,
    },

    #[error("Decoded bytes are not valid UTF-8: {source}")]
    InvalidUtf8 {
        #[from]
        source: std::string::FromUtf8Error,
    },
}

impl ConfchainError for CodecError {
    fn error_code(&self) -> &'static str {
        match self {
            CodecError::InvalidBase64 { .. } => "INVALID_ENCODING",
            CodecError::InvalidUtf8 { .. } => "INVALID_ENCODING",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Missing configuration '{what}' in {context}")]
    MissingConfig { what: String, context: String },

    #[error("Invalid value for '{what}': {source}")]
    InvalidFormat {
        what: String,
        #[source]
        source: ParseError,
    },

    #[error("Link cycle detected while resolving '{what}'")]
    LinkCycle { what: String },
}

impl ConfchainError for ResolveError {
    fn error_code(&self) -> &'static str {
        match self {
            ResolveError::MissingConfig { .. } => "MISSING_CONFIG",
            ResolveError::InvalidFormat { .. } => "INVALID_FORMAT",
            ResolveError::LinkCycle { .. } => "LINK_CYCLE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ResolveError::MissingConfig { .. } | ResolveError::InvalidFormat { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let error = ParseError::new("not a number: 'abc'");
        assert_eq!(error.to_string(), "not a number: 'abc'");
        assert_eq!(error.error_code(), "INVALID_FORMAT");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_missing_config_display() {
        let error = ResolveError::MissingConfig {
            what: "Publish Password : Credential for the publish endpoint".to_string(),
            context: "project 'demo'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing configuration 'Publish Password : Credential for the publish endpoint' in project 'demo'"
        );
        assert_eq!(error.error_code(), "MISSING_CONFIG");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_invalid_format_wraps_parse_error() {
        let error = ResolveError::InvalidFormat {
            what: "Toolchain Version".to_string(),
            source: ParseError::new("not a number: 'latest'"),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for 'Toolchain Version': not a number: 'latest'"
        );
        assert_eq!(error.error_code(), "INVALID_FORMAT");
    }

    #[test]
    fn test_link_cycle_is_not_user_error() {
        let error = ResolveError::LinkCycle {
            what: "Target Version".to_string(),
        };
        assert_eq!(error.error_code(), "LINK_CYCLE");
        assert!(!error.is_user_error());
    }
}
