use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid stored value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    /// SQLSTATE class 28 (invalid authorization) and 42501 (insufficient privilege)
    pub fn is_auth_failure(&self) -> bool {
        match self {
            StorageError::Forbidden(_) => true,
            StorageError::Database(sqlx::Error::Database(e)) => matches!(
                e.code().as_deref(),
                Some("28000") | Some("28P01") | Some("42501")
            ),
            _ => false,
        }
    }
}
