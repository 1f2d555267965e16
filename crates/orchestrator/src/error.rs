use thiserror::Error;

/// Whole-call failures. Everything per-target is report data instead.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Precondition failed before any dispatch; no partial report exists.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    #[error("batch of {requested} marketplaces exceeds the maximum of {max}")]
    BatchTooLarge { requested: usize, max: usize },
}

/// Builder error
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}
