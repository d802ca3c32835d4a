//! Error types for port operations.

/// Remote item store failures, with the failing operation for tracing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("Store request failed in {operation}: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    /// The store answered with a non-success status.
    #[error("Store returned {status} in {operation}: {message}")]
    Status {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// A document could not be decoded.
    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl StoreError {
    /// Create a Request error with operation context.
    pub fn request(operation: &'static str, message: impl ToString) -> Self {
        Self::Request {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Status error with operation context.
    pub fn status(operation: &'static str, status: u16, message: impl ToString) -> Self {
        Self::Status {
            operation,
            status,
            message: message.to_string(),
        }
    }

    /// Create a Malformed error.
    pub fn malformed(message: impl ToString) -> Self {
        Self::Malformed(message.to_string())
    }
}
