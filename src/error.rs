//! Error types for pipewright.
//!
//! Every variant carries a stable code so callers (and scripts wrapping the
//! CLI) can branch on the kind of failure without parsing messages.

use thiserror::Error;

/// Result type alias for pipewright operations.
pub type Result<T> = std::result::Result<T, Error>;

/// pipewright error types.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Rule error: {0}")]
    Rule(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Pipeline(_) => "PIPELINE_ERROR",
            Error::Rule(_) => "RULE_ERROR",
            Error::Api(_) => "API_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Http(_) => "HTTP_ERROR",
            Error::Json(_) => "JSON_ERROR",
            Error::Io(_) => "IO_ERROR",
        }
    }

    /// Get a message safe to surface outside the process.
    ///
    /// Hides transport and filesystem details that could leak endpoints or
    /// local paths; validation and API messages are user-facing already.
    pub fn external_message(&self) -> String {
        match self {
            Error::Validation(msg) => format!("Validation error: {}", msg),
            Error::Pipeline(msg) => format!("Pipeline error: {}", msg),
            Error::Rule(msg) => format!("Rule error: {}", msg),
            Error::Api(msg) => format!("API error: {}", msg),
            Error::NotFound(msg) => format!("Not found: {}", msg),
            Error::Config(msg) => format!("Configuration error: {}", msg),

            Error::Http(e) => {
                if let Some(status) = e.status() {
                    format!("HTTP request failed with status {}", status.as_u16())
                } else if e.is_timeout() {
                    "HTTP request timed out".to_string()
                } else if e.is_connect() {
                    "Failed to connect to the configuration API".to_string()
                } else {
                    "HTTP request failed".to_string()
                }
            }

            Error::Json(_) => "Invalid JSON".to_string(),
            Error::Io(_) => "An I/O error occurred".to_string(),
        }
    }

    /// Convert to a machine-parseable JSON envelope.
    pub fn to_external_json(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.external_message(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(Error::Validation("x".into()).code(), "VALIDATION_ERROR");
        assert_eq!(Error::Api("x".into()).code(), "API_ERROR");
        assert_eq!(Error::NotFound("x".into()).code(), "NOT_FOUND");
    }

    #[test]
    fn test_external_message_keeps_validation_detail() {
        let err = Error::Validation("Pipeline name is required".into());
        assert!(err.external_message().contains("name is required"));
    }

    #[test]
    fn test_external_json_envelope() {
        let json = Error::Rule("bad trigger".into()).to_external_json();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "RULE_ERROR");
    }
}
