/// Errors raised by validation, services and repositories.
///
/// The first four variants are client-facing and carry the message that is returned
/// to the caller. The remaining variants are internal failures.
#[derive(Debug, thiserror::Error)]
pub enum ClinicalsError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("storage lock poisoned")]
    StorageLockPoisoned,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClinicalsError {
    /// Returns `true` for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClinicalsError::Validation(_)
                | ClinicalsError::InvalidArgument(_)
                | ClinicalsError::NotFound(_)
                | ClinicalsError::Conflict(_)
        )
    }
}

pub type ClinicalsResult<T> = std::result::Result<T, ClinicalsError>;
