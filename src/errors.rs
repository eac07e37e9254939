use thiserror::Error;

/// Error type shared by every insight computation.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Ownership violation: {0}")]
    OwnershipViolation(String),
    #[error("Ledger query failed: {0}")]
    Store(String),
}

pub type InsightResult<T> = Result<T, InsightError>;
