//! Associations derived from a user's patients.
//!
//! A user has no stored link to hospitals or departments. The sets shown on a
//! user profile are recomputed from the patient list each time, keeping the
//! first appearance of every id.

use std::collections::HashSet;
use std::hash::Hash;

use super::{DepartmentId, EntityRef, HospitalId, PatientRecord};

fn distinct_by_id<I, F>(records: &[PatientRecord], select: F) -> Vec<EntityRef<I>>
where
    I: Copy + Eq + Hash,
    F: Fn(&PatientRecord) -> &EntityRef<I>,
{
    let mut seen = HashSet::new();
    records
        .iter()
        .map(select)
        .filter(|reference| seen.insert(reference.id))
        .cloned()
        .collect()
}

/// Hospitals referenced by `records`, each listed once in first-seen order.
pub fn distinct_hospitals(records: &[PatientRecord]) -> Vec<EntityRef<HospitalId>> {
    distinct_by_id(records, |record| &record.hospital)
}

/// Departments referenced by `records`, each listed once in first-seen order.
pub fn distinct_departments(records: &[PatientRecord]) -> Vec<EntityRef<DepartmentId>> {
    distinct_by_id(records, |record| &record.department)
}
