//! # Response Envelope
//!
//! Every endpoint, success or failure, answers with the same JSON
//! envelope so clients can branch on `success`/`code` without inspecting
//! HTTP status lines. `data` is always present and serializes as `null`
//! when there is no payload.

use serde::{Deserialize, Serialize};

/// Uniform response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// HTTP-style status code duplicated into the body.
    pub code: u16,
    pub message: String,
    /// Payload; `null` on errors and data-less successes.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope wrapping `data` with code 200.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: 200,
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    /// Successful envelope with no payload (`data: null`).
    pub fn success_empty() -> Self {
        Self {
            success: true,
            code: 200,
            message: "Success".to_string(),
            data: None,
        }
    }

    /// Error envelope carrying `code` and `message`, `data: null`.
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_wraps_data_with_200() {
        let resp = ApiResponse::success("payload");
        assert!(resp.success);
        assert_eq!(resp.code, 200);
        assert_eq!(resp.message, "Success");
        assert_eq!(resp.data, Some("payload"));
    }

    #[test]
    fn success_empty_serializes_null_data() {
        let resp = ApiResponse::<()>::success_empty();
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::Value::Null);
    }

    #[test]
    fn error_carries_code_and_message() {
        let resp = ApiResponse::<String>::error(401, "Unauthorized");
        assert!(!resp.success);
        assert_eq!(resp.code, 401);
        assert_eq!(resp.message, "Unauthorized");
        assert!(resp.data.is_none());
    }

    #[test]
    fn error_data_field_is_present_and_null() {
        // Clients rely on the `data` key existing even on errors.
        let resp = ApiResponse::<String>::error(500, "boom");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"data\":null"), "got: {json}");
    }

    #[test]
    fn envelope_round_trips() {
        let resp = ApiResponse::success(vec![1, 2, 3]);
        let json = serde_json::to_string(&resp).unwrap();
        let back: ApiResponse<Vec<i32>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.data, Some(vec![1, 2, 3]));
        assert_eq!(back.code, 200);
    }
}
