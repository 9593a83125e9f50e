//! Response types for the attendance and payroll engine API.
//!
//! This module defines the error response structures and the mapping
//! from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidArgument { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_ARGUMENT", message),
            },
            EngineError::StaffNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("STAFF_NOT_FOUND", message),
            },
            EngineError::PayslipNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("PAYSLIP_NOT_FOUND", message),
            },
            EngineError::JobRecordNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("JOB_RECORD_NOT_FOUND", message),
            },
            EngineError::AlreadyFinalized { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("ALREADY_FINALIZED", message),
            },
            EngineError::FuturePeriod { .. } => ApiErrorResponse {
                status: StatusCode::PRECONDITION_FAILED,
                error: ApiError::new("FUTURE_PERIOD", message),
            },
            EngineError::PreCutoverPeriod { .. } => ApiErrorResponse {
                status: StatusCode::PRECONDITION_FAILED,
                error: ApiError::new("PRE_CUTOVER_PERIOD", message),
            },
            EngineError::NotEligible { .. } => ApiErrorResponse {
                status: StatusCode::PRECONDITION_FAILED,
                error: ApiError::new("NOT_ELIGIBLE", message),
            },
            EngineError::HourlyNotEligible { .. } => ApiErrorResponse {
                status: StatusCode::PRECONDITION_FAILED,
                error: ApiError::new("HOURLY_NOT_ELIGIBLE", message),
            },
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::Internal { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("INTERNAL_ERROR", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_staff_not_found_maps_to_404() {
        let engine_error = EngineError::StaffNotFound {
            staff_id: "staff_404".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "STAFF_NOT_FOUND");
        assert!(api_error.error.message.contains("staff_404"));
    }

    #[test]
    fn test_already_finalized_maps_to_409() {
        let engine_error = EngineError::AlreadyFinalized {
            key: "staff_001_2026_1".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_future_period_maps_to_412() {
        let engine_error = EngineError::FuturePeriod {
            year: 2026,
            month: 9,
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::PRECONDITION_FAILED);
        assert_eq!(api_error.error.code, "FUTURE_PERIOD");
    }
}
