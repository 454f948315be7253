use thiserror::Error;
use tokio::task::JoinError;

/// Errors surfaced to callers of the recommendation service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request carried an empty favorite list
    #[error("No favorites supplied")]
    NoFavorites,

    /// A blocking strategy task panicked or was cancelled
    #[error("Recommendation task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
