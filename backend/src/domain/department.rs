//! Departments: shared reference data that manage patients.

use super::{DepartmentId, EntityName};

/// Department row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    id: DepartmentId,
    name: EntityName,
}

impl Department {
    /// Build a department from validated components.
    pub fn new(id: DepartmentId, name: EntityName) -> Self {
        Self { id, name }
    }

    /// Department identifier.
    pub fn id(&self) -> DepartmentId {
        self.id
    }

    /// Unique department name.
    pub fn name(&self) -> &EntityName {
        &self.name
    }

    /// Replace the name.
    pub fn rename(&mut self, name: EntityName) {
        self.name = name;
    }
}

/// Department awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDepartment {
    /// Unique department name.
    pub name: EntityName,
}
