//! API Response envelope
//!
//! The billing backend answers every call with one of two shapes:
//!
//! ```json
//! { "data": { ... }, "message": "Orden creada" }
//! { "error": "Stock insuficiente", "statusCode": 409 }
//! ```
//!
//! [`ApiResponse::into_result`] normalizes both into a `Result` so the
//! client layer has a single error channel.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-reported business error
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub status_code: Option<u16>,
}

impl ApiError {
    /// Authorization failures are special-cased in the UI: either the
    /// backend sent HTTP 401 or the message carries the marker text.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code == Some(StatusCode::UNAUTHORIZED.as_u16())
            || self.error.contains("No autorizado")
            || self.error.contains("Unauthorized")
    }
}

/// Unified API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
            error: None,
            status_code: None,
        }
    }

    /// Create a successful response with a user-facing message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
            error: None,
            status_code: None,
        }
    }

    /// Create an error response
    pub fn error(error: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            data: None,
            message: None,
            error: Some(error.into()),
            status_code,
        }
    }

    /// Normalize into a result, requiring `data` on success.
    pub fn into_result(self) -> Result<(T, Option<String>), ApiError> {
        if let Some(error) = self.error {
            return Err(ApiError {
                error,
                status_code: self.status_code,
            });
        }
        match self.data {
            Some(data) => Ok((data, self.message)),
            None => Err(ApiError {
                error: "Respuesta del servidor sin datos".to_string(),
                status_code: None,
            }),
        }
    }

    /// Normalize into a bare acknowledgement, for operations whose
    /// success payload is only a message (archive, reactivate).
    pub fn into_ack(self) -> Result<Option<String>, ApiError> {
        if let Some(error) = self.error {
            return Err(ApiError {
                error,
                status_code: self.status_code,
            });
        }
        Ok(self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_normalizes() {
        let resp: ApiResponse<Vec<i32>> =
            serde_json::from_value(serde_json::json!({ "data": [1, 2], "message": "ok" })).unwrap();
        let (data, message) = resp.into_result().unwrap();
        assert_eq!(data, vec![1, 2]);
        assert_eq!(message.as_deref(), Some("ok"));
    }

    #[test]
    fn error_envelope_never_reaches_success() {
        let resp: ApiResponse<Vec<i32>> =
            serde_json::from_value(serde_json::json!({ "error": "boom", "statusCode": 409 }))
                .unwrap();
        let err = resp.into_result().unwrap_err();
        assert_eq!(err.error, "boom");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn unauthorized_detected_by_status_and_marker() {
        let by_status = ApiError {
            error: "whatever".into(),
            status_code: Some(401),
        };
        assert!(by_status.is_unauthorized());

        let by_marker = ApiError {
            error: "No autorizado para esta operación".into(),
            status_code: None,
        };
        assert!(by_marker.is_unauthorized());
    }

    #[test]
    fn ack_tolerates_missing_data() {
        let resp: ApiResponse<()> =
            serde_json::from_value(serde_json::json!({ "message": "2 órdenes archivadas" }))
                .unwrap();
        assert_eq!(resp.into_ack().unwrap().as_deref(), Some("2 órdenes archivadas"));
    }
}
