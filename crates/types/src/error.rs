use serde::{Deserialize, Serialize};
use std::fmt;

/// Error taxonomy shared by every dispatch path.
///
/// These are kinds, not control flow: once dispatch has begun, a failure of
/// one marketplace is data folded into the report, never an exception that
/// unwinds the batch. Only `Validation` aborts a whole call, and it does so
/// before anything is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownMarketplace,
    MissingCredential,
    InvalidCredentials,
    DuplicateAccount,
    RateLimited,
    Timeout,
    Unreachable,
    PersistenceFailed,
    Validation,
}

impl ErrorKind {
    /// Whether the caller may re-dispatch this attempt without user action.
    pub fn retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::Timeout | ErrorKind::RateLimited | ErrorKind::Unreachable
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::UnknownMarketplace => "unknown_marketplace",
            ErrorKind::MissingCredential => "missing_credential",
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::DuplicateAccount => "duplicate_account",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Unreachable => "unreachable",
            ErrorKind::PersistenceFailed => "persistence_failed",
            ErrorKind::Validation => "validation",
        };
        f.write_str(s)
    }
}

/// One per-target failure, as surfaced to the caller in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
#[serde(rename_all = "camelCase")]
pub struct AttemptError {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl AttemptError {
    /// Build an error with retryability derived from the kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable: kind.retryable(),
        }
    }
}
