use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found")]
    NotFound,
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Version conflict on {id}: expected version {expected_version}")]
    ConcurrencyConflict { id: Uuid, expected_version: i32 },
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
