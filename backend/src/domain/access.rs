//! Ownership checks for patient-scoped operations.

use super::{Error, Patient, UserId};

/// Message returned when a user touches someone else's patient.
pub const FORBIDDEN_MESSAGE: &str = "Forbidden";

/// Fail with [`Error::forbidden`] unless `identity` owns `patient`.
pub fn ensure_owner(identity: UserId, patient: &Patient) -> Result<(), Error> {
    if patient.user_id() == identity {
        Ok(())
    } else {
        Err(Error::forbidden(FORBIDDEN_MESSAGE))
    }
}
