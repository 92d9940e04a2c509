//! Errors shared by every registry repository port.

use crate::domain::{EntityKind, Error, NameValidationError};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A unique name constraint rejected the write.
        DuplicateName { kind: EntityKind } => "duplicate {kind} name",
        /// A foreign key named a row that does not exist.
        MissingReference { kind: EntityKind } => "{kind} reference does not exist",
    }
}

impl From<RepositoryError> for Error {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Connection { .. } => {
                tracing::warn!(error = %value, "registry store unavailable");
                Self::service_unavailable("Registry store is unavailable")
            }
            RepositoryError::Query { .. } => Self::internal(value.to_string()),
            RepositoryError::DuplicateName { kind } => NameValidationError::Taken(kind).into(),
            RepositoryError::MissingReference { kind } => Self::not_found(kind.not_found_message()),
        }
    }
}
