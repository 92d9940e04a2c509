//! Translation of pool and Diesel failures into `RepositoryError`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::EntityKind;
use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Resolve the referenced table from a patients foreign key violation.
fn referenced_kind(message: &str, constraint_name: Option<&str>) -> Option<EntityKind> {
    let haystack = constraint_name.unwrap_or(message).to_lowercase();
    if haystack.contains("user_id_fkey") {
        Some(EntityKind::User)
    } else if haystack.contains("hospital_id_fkey") {
        Some(EntityKind::Hospital)
    } else if haystack.contains("department_id_fkey") {
        Some(EntityKind::Department)
    } else {
        None
    }
}

/// Map Diesel errors raised while writing rows of `kind`.
///
/// Unique violations become [`RepositoryError::DuplicateName`] because the
/// only unique column on every table is `name`.
pub(crate) fn map_diesel_error(error: DieselError, kind: EntityKind) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(db_kind, info) => {
            debug!(?db_kind, message = info.message(), %kind, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            %kind,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(db_kind, info) => match db_kind {
            DatabaseErrorKind::UniqueViolation => RepositoryError::duplicate_name(kind),
            DatabaseErrorKind::ForeignKeyViolation => {
                match referenced_kind(info.message(), info.constraint_name()) {
                    Some(referenced) => RepositoryError::missing_reference(referenced),
                    None => {
                        warn!(
                            message = info.message(),
                            constraint_name = ?info.constraint_name(),
                            "unrecognised foreign key violation"
                        );
                        RepositoryError::query("foreign key violation")
                    }
                }
            }
            DatabaseErrorKind::ClosedConnection => {
                RepositoryError::connection("database connection error")
            }
            _ => RepositoryError::query("database error"),
        },
        _ => RepositoryError::query("database error"),
    }
}
