//! Error types for ledger-snapshot
//!
//! Every fallible public API returns `Result<T, Error>` where Error is defined
//! here. Fetch operations never surface these to the top-level run directly:
//! they are folded into `Aggregate` / `MarketOutcome` values instead.

use thiserror::Error;

/// The main error type for ledger-snapshot
#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to parse order book: {message}")]
    OrderBook { message: String },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // Template Errors
    // ============================================================================
    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable { variable: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an order book parse error
    pub fn order_book(message: impl Into<String>) -> Self {
        Self::OrderBook {
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Whether another attempt of the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => matches!(status, 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

/// Result type alias for ledger-snapshot
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::order_book("missing ### Bids table");
        assert_eq!(
            err.to_string(),
            "Failed to parse order book: missing ### Bids table"
        );

        let err = Error::invalid_value("ledger.page_limit", "must be between 1 and 200");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'ledger.page_limit': must be between 1 and 200"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::RateLimited {
            retry_after_seconds: 60
        }
        .is_retryable());
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::http_status(503, "").is_retryable());
        assert!(Error::http_status(502, "").is_retryable());

        assert!(!Error::http_status(400, "").is_retryable());
        assert!(!Error::http_status(404, "").is_retryable());
        assert!(!Error::decode("bad json").is_retryable());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::output("disk full"));
        let with_context = result.context("writing holders");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("writing holders: Output error: disk full"));
    }
}
