//! Error types shared by the engine and its transports

use thiserror::Error;

/// Why a remote call did not produce a usable result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureCause {
    /// The server answered with a non-2xx status
    #[error("server responded with status {0}")]
    Status(u16),

    /// The request never completed (connection refused, DNS, CORS, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// A 2xx response whose body could not be decoded
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Failure of one remote collection operation.
///
/// Every variant means "the remote call did not return success"; the cause
/// is kept for logging only and never shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("list request failed: {0}")]
    FetchFailed(FailureCause),

    #[error("create request failed: {0}")]
    CreateFailed(FailureCause),

    #[error("update request failed: {0}")]
    UpdateFailed(FailureCause),

    #[error("delete request failed: {0}")]
    DeleteFailed(FailureCause),
}

impl GatewayError {
    pub fn cause(&self) -> &FailureCause {
        match self {
            Self::FetchFailed(c)
            | Self::CreateFailed(c)
            | Self::UpdateFailed(c)
            | Self::DeleteFailed(c) => c,
        }
    }
}

/// Rejected field schema definitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field name must not be empty")]
    EmptyName,

    #[error("duplicate field name '{0}'")]
    DuplicateName(String),

    /// `id` is assigned by the remote store and cannot be a form field
    #[error("field name '{0}' is reserved")]
    ReservedName(String),
}

/// Errors raised while decoding a record from the remote store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record has no id")]
    MissingId,

    #[error("record id must be a string or a number, got {0}")]
    InvalidId(String),
}
