// ABOUTME: Unified error handling for FitTrack with error codes and user-facing categories
// ABOUTME: Defines AppError, ErrorCode, ErrorCategory and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace returns [`AppResult`]. Errors carry
//! a stable [`ErrorCode`], a human-readable message and an optional source.
//! Codes map onto the small set of [`ErrorCategory`] values the client reacts
//! to: a disabled feature, a permission hint, a transient notice, or a
//! rejected form. Nothing in this taxonomy is fatal to the process.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid = 1001,

    // Device capabilities (2000-2999)
    #[serde(rename = "CAPABILITY_UNAVAILABLE")]
    CapabilityUnavailable = 2000,
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 2001,
    #[serde(rename = "POSITION_UNAVAILABLE")]
    PositionUnavailable = 2002,
    #[serde(rename = "POSITION_TIMEOUT")]
    PositionTimeout = 2003,

    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,

    // Resources (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,
    #[serde(rename = "INDEX_MISSING")]
    IndexMissing = 4002,

    // External services (5000-5999)
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 5002,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6000,

    // Internal (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9001,
}

/// How the client surfaces a failure to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Positioning or networking API is absent: feature is disabled
    CapabilityUnavailable,
    /// User declined access: show a remediation hint
    PermissionDenied,
    /// Store write, geo search or weather fetch failed: one transient notice, no retry
    TransientNetwork,
    /// Form input rejected before submission
    InvalidInput,
    /// Sign-in required or credentials rejected
    Auth,
    /// Programming or configuration fault
    Internal,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AuthRequired => "You must be signed in to do that",
            Self::AuthInvalid => "The provided credentials are invalid",
            Self::CapabilityUnavailable => "This device does not support the requested feature",
            Self::PermissionDenied => "Access to the requested capability was denied",
            Self::PositionUnavailable => "Location information is unavailable",
            Self::PositionTimeout => "Location request timed out",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::InvalidFormat => "The data format is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::IndexMissing => "The requested ordering is not supported by the store",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::StorageError => "Saving data failed",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Map this code onto the user-facing failure taxonomy
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::CapabilityUnavailable => ErrorCategory::CapabilityUnavailable,
            Self::PermissionDenied => ErrorCategory::PermissionDenied,
            Self::PositionUnavailable
            | Self::PositionTimeout
            | Self::ExternalServiceError
            | Self::ExternalServiceUnavailable
            | Self::StorageError
            | Self::IndexMissing => ErrorCategory::TransientNetwork,
            Self::InvalidInput | Self::MissingRequiredField | Self::InvalidFormat => {
                ErrorCategory::InvalidInput
            }
            Self::AuthRequired | Self::AuthInvalid | Self::ResourceAlreadyExists => {
                ErrorCategory::Auth
            }
            Self::ResourceNotFound
            | Self::ConfigInvalid
            | Self::InternalError
            | Self::SerializationError => ErrorCategory::Internal,
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Category used to decide how the failure is surfaced
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Whether the failure is a transient network/store failure (reported once, never retried)
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.category() == ErrorCategory::TransientNetwork
    }

    /// Sign-in required
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "You must be logged in")
    }

    /// Credentials rejected
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Positioning or networking capability missing on this device
    pub fn capability_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CapabilityUnavailable, message)
    }

    /// User declined access to a capability
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required field
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingRequiredField, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Resource already exists
    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceAlreadyExists,
            format!("{} already exists", resource.into()),
        )
    }

    /// Store write or read failed
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service returned no usable data
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(feature = "provider-errors")]
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let code = if error.is_timeout() || error.is_connect() {
            ErrorCode::ExternalServiceUnavailable
        } else {
            ErrorCode::ExternalServiceError
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
