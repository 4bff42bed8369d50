//! Error types module
//!
//! This module provides the core error types used throughout the Trove
//! application. All errors are unified under the `AppError` enum which can
//! represent storage, validation, and other domain-specific errors.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage temporarily unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Limit exceeded: {resource} usage {used}/{limit}")]
    LimitExceeded {
        resource: String,
        used: usize,
        limit: usize,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::Storage(_) => 500,
            AppError::StorageUnavailable(_) => 503,
            AppError::ImageProcessing(_) => 422,
            AppError::InvalidInput(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::PayloadTooLarge(_) => 413,
            AppError::LimitExceeded { .. } => 409,
            AppError::Unauthorized(_) => 401,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            AppError::ImageProcessing(_) => "IMAGE_PROCESSING_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::LimitExceeded { .. } => "LIMIT_EXCEEDED",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::StorageUnavailable(_) | AppError::Storage(_)
        )
    }

    fn client_message(&self) -> String {
        match self {
            // Internal details stay out of client responses
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "An internal error occurred".to_string()
            }
            AppError::Storage(_) => "Storage operation failed".to_string(),
            other => other.to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_)
            | AppError::NotFound(_)
            | AppError::PayloadTooLarge(_)
            | AppError::ImageProcessing(_) => LogLevel::Debug,
            AppError::LimitExceeded { .. }
            | AppError::Unauthorized(_)
            | AppError::StorageUnavailable(_) => LogLevel::Warn,
            AppError::Storage(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => LogLevel::Error,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidInput("bad".into()).http_status_code(), 400);
        assert_eq!(AppError::NotFound("gone".into()).http_status_code(), 404);
        assert_eq!(
            AppError::PayloadTooLarge("big".into()).http_status_code(),
            413
        );
        assert_eq!(
            AppError::LimitExceeded {
                resource: "images".into(),
                used: 10,
                limit: 10
            }
            .http_status_code(),
            409
        );
        assert_eq!(
            AppError::StorageUnavailable("timeout".into()).http_status_code(),
            503
        );
    }

    #[test]
    fn test_internal_message_hidden() {
        let err = AppError::Internal("secret path /var/lib".into());
        assert!(!err.client_message().contains("/var/lib"));
    }
}
