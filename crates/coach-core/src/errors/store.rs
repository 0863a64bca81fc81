// ABOUTME: Record-store error types for sample, workout, and report persistence calls
// ABOUTME: Converts store failures into AppError with retry-aware error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};

/// Errors raised by the external record store or its adapters
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store rejected or failed a read
    #[error("Fetch '{operation}' failed: {reason}")]
    FetchFailed {
        /// Store operation that failed
        operation: &'static str,
        /// Failure details from the store
        reason: String,
    },

    /// The store could not be reached
    #[error("Store unavailable during '{operation}': {reason}")]
    Unavailable {
        /// Store operation that was attempted
        operation: &'static str,
        /// Failure details from the transport
        reason: String,
    },

    /// Writing a document failed
    #[error("Write to '{collection}' failed: {reason}")]
    WriteFailed {
        /// Target collection
        collection: &'static str,
        /// Failure details from the store
        reason: String,
    },

    /// A stored document could not be decoded
    #[error("Malformed document in '{collection}'")]
    Malformed {
        /// Collection holding the malformed document
        collection: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Create a fetch failure for the given operation
    #[must_use]
    pub fn fetch_failed(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            operation,
            reason: reason.into(),
        }
    }

    /// Create a write failure for the given collection
    #[must_use]
    pub fn write_failed(collection: &'static str, reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            collection,
            reason: reason.into(),
        }
    }

    const fn code(&self) -> ErrorCode {
        match self {
            Self::FetchFailed { .. } => ErrorCode::FetchFailed,
            Self::Unavailable { .. } => ErrorCode::StoreUnavailable,
            Self::WriteFailed { .. } => ErrorCode::StorageError,
            Self::Malformed { .. } => ErrorCode::SerializationError,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        Self::new(error.code(), error.to_string()).with_source(error)
    }
}
