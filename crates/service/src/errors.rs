use thiserror::Error;

/// Errors surfaced by a [`crate::repository::UserRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("user not found: {0}")]
    NotFound(String),
}

impl RepositoryError {
    pub fn user_not_found(id: &str) -> Self {
        Self::NotFound(id.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Model(_) | ServiceError::Repository(RepositoryError::InvalidArgument(_)) => 1001,
            ServiceError::Repository(RepositoryError::NotFound(_)) => 1003,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Repository(RepositoryError::NotFound(_)))
    }
}
