//! Repository error model shared by employee and review persistence.

use crate::db::DbError;
use crate::model::employee::EmployeeId;
use crate::model::validation::ModelValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persisted entity kind, used to qualify not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Employee,
    Review,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Employee => f.write_str("employee"),
            Self::Review => f.write_str("performance review"),
        }
    }
}

/// Error for local-store persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before any I/O.
    Validation(ModelValidationError),
    /// Storage or bootstrap failure.
    Db(DbError),
    /// Well-formed request matched zero rows.
    NotFound { entity: Entity, id: i64 },
    /// Foreign key field points at an employee that does not exist.
    MissingReference {
        field: &'static str,
        id: EmployeeId,
    },
    /// Insert reused an existing caller-supplied employee id.
    DuplicateEmployee(EmployeeId),
    /// Requested manager change would make the hierarchy cyclic.
    HierarchyCycle {
        employee_id: EmployeeId,
        manager_id: EmployeeId,
    },
    /// Persisted row cannot be converted to a valid model.
    InvalidData(String),
}

impl RepoError {
    /// Returns whether this error signals a missing row rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::MissingReference { field, id } => {
                write!(f, "{field} references missing employee {id}")
            }
            Self::DuplicateEmployee(id) => write!(f, "employee already exists: {id}"),
            Self::HierarchyCycle {
                employee_id,
                manager_id,
            } => write!(
                f,
                "employee {employee_id} cannot report to {manager_id}: hierarchy would contain a cycle"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::MissingReference { .. }
            | Self::DuplicateEmployee(_)
            | Self::HierarchyCycle { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Returns whether a SQLite error carries the given extended result code.
pub(crate) fn has_extended_code(err: &rusqlite::Error, code: std::ffi::c_int) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(failure, _) if failure.extended_code == code)
}
