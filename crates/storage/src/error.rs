use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
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

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Rewrites unique/foreign key violations into a `ConstraintViolation`
    /// carrying a caller-facing message; other errors pass through.
    pub fn with_constraint_message(self, unique: &str, foreign_key: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(unique.to_string())
        } else if self.is_foreign_key_violation() {
            StorageError::ConstraintViolation(foreign_key.to_string())
        } else {
            self
        }
    }
}

/// Entity kinds named by [`RaceError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Owner,
    Camel,
    Event,
    Loop,
    Result,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Owner => "owner",
            Self::Camel => "camel",
            Self::Event => "event",
            Self::Loop => "loop",
            Self::Result => "race result",
        };
        f.write_str(name)
    }
}

/// Failures of the registration and ranking operations.
///
/// Every variant except `Storage` is raised before the first write of the
/// unit of work, so a failed call never leaves partial state behind.
#[derive(Debug, Error)]
pub enum RaceError {
    #[error("{0} not found")]
    NotFound(Entity),

    #[error("Camel age class and sex do not match the loop")]
    EligibilityMismatch,

    #[error("Loop is full")]
    CapacityExceeded,

    #[error("Camel is already registered in this loop")]
    DuplicateRegistration,

    #[error("Registration for this loop is closed")]
    RegistrationClosed,

    #[error("Rank is out of range")]
    InvalidRank,

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<sqlx::Error> for RaceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Storage(StorageError::Database(error))
    }
}

impl RaceError {
    /// Stable machine-readable kind, used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::EligibilityMismatch => "eligibility_mismatch",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::DuplicateRegistration => "duplicate_registration",
            Self::RegistrationClosed => "registration_closed",
            Self::InvalidRank => "invalid_rank",
            Self::Validation(_) => "validation_error",
            Self::Storage(_) => "storage_failure",
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, RaceError>;
