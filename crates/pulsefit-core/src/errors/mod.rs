// ABOUTME: Unified error handling with standard error codes for metrics and catalog operations
// ABOUTME: Distinguishes input validation, upstream fetch, and configuration failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! A single `AppError` type flows through the metrics engine and the catalog
//! cache. The `ErrorCode` classifies the failure so callers can tell a
//! malformed profile (show an "incomplete profile" state) apart from an
//! upstream outage (offer a retry).

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required field was absent
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// Value outside the accepted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// Requested entity does not exist upstream
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// Upstream responded with an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Upstream unreachable or failing with a server error
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// Upstream rejected the request for rate limiting
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,

    // Configuration (6000-6999)
    /// Configuration is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Serialization or deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code equivalent for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::ValueOutOfRange => 400,
            Self::ResourceNotFound => 404,
            Self::ExternalServiceError | Self::ExternalServiceUnavailable => 502,
            Self::ExternalRateLimited => 503,
            Self::ConfigInvalid | Self::InternalError | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Stable string form used in logs and serialized errors
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::ValueOutOfRange => "VALUE_OUT_OF_RANGE",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
            Self::ExternalServiceUnavailable => "EXTERNAL_SERVICE_UNAVAILABLE",
            Self::ExternalRateLimited => "EXTERNAL_RATE_LIMITED",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorContext {
    /// Input field the error refers to
    pub field: Option<String>,
    /// Upstream service name for fetch failures
    pub service: Option<String>,
    /// Resource identifier if applicable
    pub resource_id: Option<String>,
}

/// Unified error type for the workspace
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Attach the offending input field
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context.field = Some(field.into());
        self
    }

    /// Attach the upstream service name
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.context.service = Some(service.into());
        self
    }

    /// Attach a resource identifier
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Input failed validation
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// A required input field was absent
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
        .with_field(field)
    }

    /// An input field held a value outside its accepted range
    #[must_use]
    pub fn out_of_range(field: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message).with_field(field)
    }

    /// Upstream entity was not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{resource} not found"),
        )
        .with_resource_id(resource)
    }

    /// Upstream service returned an error
    #[must_use]
    pub fn external_service(service: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceError, message).with_service(service)
    }

    /// Upstream service could not be reached or failed server-side
    #[must_use]
    pub fn external_unavailable(service: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceUnavailable, message).with_service(service)
    }

    /// Upstream service rate limited the request
    #[must_use]
    pub fn external_rate_limited(service: &str) -> Self {
        Self::new(
            ErrorCode::ExternalRateLimited,
            format!("{service} rate limit exceeded"),
        )
        .with_service(service)
    }

    /// Configuration is invalid
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Serialization failure
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal failure
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Whether this error reports malformed or missing caller input
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::InvalidInput | ErrorCode::MissingRequiredField | ErrorCode::ValueOutOfRange
        )
    }

    /// Whether this error originated in an upstream service
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ResourceNotFound
                | ErrorCode::ExternalServiceError
                | ErrorCode::ExternalServiceUnavailable
                | ErrorCode::ExternalRateLimited
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {error}")).with_source(error)
    }
}

#[cfg(feature = "http-errors")]
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let message = format!("HTTP request failed: {error}");
        if error.is_timeout() || error.is_connect() {
            Self::new(ErrorCode::ExternalServiceUnavailable, message).with_source(error)
        } else if error.is_decode() {
            Self::new(ErrorCode::SerializationError, message).with_source(error)
        } else {
            Self::new(ErrorCode::ExternalServiceError, message).with_source(error)
        }
    }
}

/// Result type alias using [`AppError`]
pub type AppResult<T> = Result<T, AppError>;
