pub mod attempt;
pub mod config;
pub mod error;
pub mod publish;
pub mod signup;
pub mod validator;

// Re-export main types
pub use attempt::{
    AttemptLog, AttemptLogError, AttemptOperation, AttemptRecord, InMemoryAttemptLog,
};
pub use config::OrchestratorConfig;
pub use error::{BuilderError, OrchestratorError};
pub use publish::{PublishOrchestrator, PublishOrchestratorBuilder};
pub use signup::{BulkSignupOrchestrator, BulkSignupOrchestratorBuilder};
pub use validator::{signup_preconditions, MIN_PASSWORD_LEN};
