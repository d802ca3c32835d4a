//! Error bodies returned by the REST API and sent over WebSocket

use serde::{Deserialize, Serialize};

/// Error classification code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Rejected before any remote call
    InvalidInput,
    /// The remote item store failed
    RemoteUnavailable,
    /// Malformed message
    BadRequest,
    /// Unknown code for forward compatibility
    #[serde(other)]
    Unknown,
}

/// JSON error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_serializes_screaming_snake() {
        let body = ErrorResponse::new(ErrorCode::RemoteUnavailable, "down");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "REMOTE_UNAVAILABLE");
        assert_eq!(json["message"], "down");
    }

    #[test]
    fn unknown_code_deserializes() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"code":"RATE_LIMITED","message":"x"}"#).unwrap();
        assert_eq!(body.code, ErrorCode::Unknown);
    }
}
