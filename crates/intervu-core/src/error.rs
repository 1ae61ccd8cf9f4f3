//! Error types for the Intervu application.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire Intervu application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. No variant is fatal: every
/// failure resolves to a well-defined state that the caller can recover from.
#[derive(Error, Debug, Clone, Serialize)]
pub enum IntervuError {
    /// Login attempt with credentials that match no directory entry.
    /// Recovered by the caller re-prompting; session state is unchanged.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration attempt with an email that is already in the directory.
    /// Recovered by the caller re-prompting; nothing is mutated.
    #[error("Email '{email}' is already in use")]
    EmailTaken { email: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", etc.
        message: String,
    },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntervuError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an EmailTaken error
    pub fn email_taken(email: impl Into<String>) -> Self {
        Self::EmailTaken {
            email: email.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an InvalidCredentials error
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }

    /// Check if this is an EmailTaken error
    pub fn is_email_taken(&self) -> bool {
        matches!(self, Self::EmailTaken { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a serialization error.
    ///
    /// The session bootstrap path uses this to distinguish a corrupt stored
    /// record (self-healed by deleting it) from a genuine storage failure.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for IntervuError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for IntervuError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, IntervuError>`.
pub type Result<T> = std::result::Result<T, IntervuError>;
