use std::fmt;

/// The kinds of record the clinic stores, used to name the subject of a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Diagnosis,
    Specialty,
    HealthSystem,
    Doctor,
    Patient,
    Visit,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Diagnosis => "Diagnosis",
            EntityKind::Specialty => "Specialty",
            EntityKind::HealthSystem => "Health System",
            EntityKind::Doctor => "Doctor",
            EntityKind::Patient => "Patient",
            EntityKind::Visit => "Visit",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("{0} not found")]
    NotFound(EntityKind),
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("Doctor with id {doctor_id} cannot be general practitioner.")]
    DoctorNotGp { doctor_id: i64 },
    #[error("The minimal income cannot be negative")]
    NegativeIncome,
    #[error("There are no patients.")]
    NoPatients,
    #[error("Could not perform the operation because the entity has relations to other entities")]
    HasRelations,

    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },
    #[error("stored value could not be decoded: {0}")]
    InvalidStoredValue(String),
    #[error("income total exceeds the representable decimal range")]
    IncomeOverflow,
    #[error("database lock poisoned")]
    LockPoisoned,
}

impl ClinicError {
    /// Single validation failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        ClinicError::Validation(vec![message.into()])
    }

    /// Maps a SQLite failure, turning constraint violations into [`ClinicError::HasRelations`].
    ///
    /// Used on delete and update paths, where a foreign key refusing the statement means a
    /// dependent record still points at the row.
    pub fn from_write(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                ClinicError::HasRelations
            }
            _ => ClinicError::Database(err),
        }
    }
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
