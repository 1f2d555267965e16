use crosslist_types::{AttemptError, ErrorKind};
use thiserror::Error;

/// Typed failure from a connector call.
///
/// Cloneable so test doubles can replay a configured failure; every variant
/// maps onto the shared [`ErrorKind`] taxonomy for the report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("no credential supplied for an authenticated call")]
    MissingCredential,

    #[error("marketplace rejected the stored credential")]
    InvalidCredentials,

    #[error("an account already exists for this email")]
    DuplicateAccount,

    #[error("rate limited by marketplace{}", retry_after_secs.map(|s| format!(", retry after {s}s")).unwrap_or_default())]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("marketplace did not respond in time")]
    Timeout,

    #[error("marketplace unreachable: {0}")]
    Unreachable(String),

    #[error("operation not supported by this connector: {operation}")]
    Unsupported { operation: &'static str },
}

impl ConnectorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConnectorError::MissingCredential => ErrorKind::MissingCredential,
            ConnectorError::InvalidCredentials => ErrorKind::InvalidCredentials,
            ConnectorError::DuplicateAccount => ErrorKind::DuplicateAccount,
            ConnectorError::RateLimited { .. } => ErrorKind::RateLimited,
            ConnectorError::Timeout => ErrorKind::Timeout,
            ConnectorError::Unreachable(_) => ErrorKind::Unreachable,
            // Routing bug or miswired registry; the user cannot retry it away.
            ConnectorError::Unsupported { .. } => ErrorKind::Validation,
        }
    }
}

impl From<ConnectorError> for AttemptError {
    fn from(err: ConnectorError) -> Self {
        AttemptError::new(err.kind(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_onto_taxonomy() {
        assert_eq!(ConnectorError::Timeout.kind(), ErrorKind::Timeout);
        assert_eq!(
            ConnectorError::RateLimited {
                retry_after_secs: Some(30)
            }
            .kind(),
            ErrorKind::RateLimited
        );
        assert_eq!(
            ConnectorError::DuplicateAccount.kind(),
            ErrorKind::DuplicateAccount
        );
    }

    #[test]
    fn attempt_error_carries_retryability() {
        let attempt: AttemptError = ConnectorError::Unreachable("dns failure".to_string()).into();
        assert!(attempt.retryable);

        let attempt: AttemptError = ConnectorError::InvalidCredentials.into();
        assert!(!attempt.retryable);
    }
}
