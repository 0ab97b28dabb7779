use thiserror::Error;

/// Failures of the user store operations
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("email already registered: {email}")]
    Conflict { email: String },
    #[error("user {0} not found")]
    NotFound(i32),
    #[error("repository error: {0}")]
    Repository(String),
}

impl UserStoreError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            UserStoreError::Conflict { .. } => 2001,
            UserStoreError::NotFound(_) => 2002,
            UserStoreError::Repository(_) => 2100,
        }
    }
}
