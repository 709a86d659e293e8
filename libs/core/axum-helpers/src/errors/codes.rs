//! Type-safe error codes for API responses.
//!
//! Each error code carries:
//! - String representation for client consumption (e.g., "INVALID_JSON")
//! - Integer code for logging and monitoring (e.g., 1010)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidObjectId;
//! assert_eq!(code.as_str(), "INVALID_OBJECT_ID");
//! assert_eq!(code.code(), 1002);
//! ```

use serde::{Deserialize, Serialize};

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request was well-formed but rejected by a domain rule
    ValidationError,

    /// Path identifier is not a 24-character hex ObjectId
    InvalidObjectId,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with current resource state (e.g., duplicate name)
    Conflict,

    /// Request body is not valid JSON or does not match the expected shape
    InvalidJson,

    /// Path exists but does not accept the request method
    MethodNotAllowed,

    // Database errors (2000-2999)
    /// Document store operation failed
    DatabaseError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for programmatic handling by clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidObjectId => "INVALID_OBJECT_ID",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InvalidJson => "INVALID_JSON",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code used in structured logs.
    ///
    /// - 1000-1999: Client errors
    /// - 2000-2999: Database errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidObjectId => 1002,
            Self::NotFound => 1004,
            Self::MethodNotAllowed => 1005,
            Self::Conflict => 1008,
            Self::InvalidJson => 1010,
            Self::DatabaseError => 2003,
        }
    }

    /// Default user-facing message. Handlers may override it with something more specific.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidObjectId => "Invalid identifier format",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::InvalidJson => "Invalid JSON format",
            Self::MethodNotAllowed => "Method not allowed",
            Self::DatabaseError => "An internal server error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
