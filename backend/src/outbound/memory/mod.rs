//! In-process registry store.
//!
//! Implements every repository port over one mutex-guarded state so each
//! call is a single critical section. It mirrors the PostgreSQL schema:
//! serial ids per table, unique names, foreign keys on patients, and cascading
//! deletes. Used when no database URL is configured and throughout the tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    DepartmentRepository, HospitalRepository, PatientRepository, RepositoryError, UserRepository,
};
use crate::domain::{
    Department, DepartmentId, EntityKind, EntityName, EntityRef, Hospital, HospitalId,
    NewDepartment, NewHospital, NewPatient, NewUser, Patient, PatientId, PatientRecord, User,
    UserId,
};

#[derive(Debug)]
struct Table<T> {
    next_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug, Default)]
struct State {
    users: Table<User>,
    hospitals: Table<Hospital>,
    departments: Table<Department>,
    patients: Table<Patient>,
}

impl State {
    fn record(&self, patient: &Patient) -> Result<PatientRecord, RepositoryError> {
        let hospital = self
            .hospitals
            .rows
            .get(&patient.hospital_id().get())
            .ok_or_else(|| RepositoryError::query("patient references a missing hospital"))?;
        let department = self
            .departments
            .rows
            .get(&patient.department_id().get())
            .ok_or_else(|| RepositoryError::query("patient references a missing department"))?;
        Ok(PatientRecord {
            patient: patient.clone(),
            hospital: EntityRef {
                id: hospital.id(),
                name: hospital.name().clone(),
            },
            department: EntityRef {
                id: department.id(),
                name: department.name().clone(),
            },
        })
    }

    fn records<F>(&self, keep: F) -> Result<Vec<PatientRecord>, RepositoryError>
    where
        F: Fn(&Patient) -> bool,
    {
        self.patients
            .rows
            .values()
            .filter(|patient| keep(patient))
            .map(|patient| self.record(patient))
            .collect()
    }

    fn check_patient_refs(
        &self,
        user_id: UserId,
        hospital_id: HospitalId,
        department_id: DepartmentId,
    ) -> Result<(), RepositoryError> {
        if !self.users.rows.contains_key(&user_id.get()) {
            return Err(RepositoryError::missing_reference(EntityKind::User));
        }
        if !self.hospitals.rows.contains_key(&hospital_id.get()) {
            return Err(RepositoryError::missing_reference(EntityKind::Hospital));
        }
        if !self.departments.rows.contains_key(&department_id.get()) {
            return Err(RepositoryError::missing_reference(EntityKind::Department));
        }
        Ok(())
    }

    fn cascade<F>(&mut self, orphaned: F)
    where
        F: Fn(&Patient) -> bool,
    {
        self.patients.rows.retain(|_, patient| !orphaned(patient));
    }
}

fn name_taken<'a, T, I>(
    rows: impl IntoIterator<Item = &'a T>,
    name: &EntityName,
    current: Option<I>,
    key: impl Fn(&T) -> (I, &EntityName),
) -> bool
where
    T: 'a,
    I: PartialEq,
{
    rows.into_iter().any(|row| {
        let (id, existing) = key(row);
        existing == name && current.as_ref() != Some(&id)
    })
}

/// Mutex-guarded in-memory implementation of every repository port.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    state: Mutex<State>,
}

impl InMemoryRegistry {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::query("in-memory registry lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryRegistry {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut state = self.lock()?;
        if name_taken(state.users.rows.values(), &user.name, None, |u| {
            (u.id(), u.name())
        }) {
            return Err(RepositoryError::duplicate_name(EntityKind::User));
        }
        let id = state.users.allocate();
        let created = User::new(UserId::new(id), user.name.clone(), user.credential.clone());
        state.users.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.users.rows.get(&id.get()).cloned())
    }

    async fn find_by_name(&self, name: &EntityName) -> Result<Option<User>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.users.rows.values().find(|u| u.name() == name).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.lock()?.users.rows.values().cloned().collect())
    }

    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let mut state = self.lock()?;
        if state.users.rows.remove(&id.get()).is_none() {
            return Ok(false);
        }
        state.cascade(|patient| patient.user_id() == id);
        Ok(true)
    }
}

#[async_trait]
impl HospitalRepository for InMemoryRegistry {
    async fn create(&self, hospital: &NewHospital) -> Result<Hospital, RepositoryError> {
        let mut state = self.lock()?;
        if name_taken(state.hospitals.rows.values(), &hospital.name, None, |h| {
            (h.id(), h.name())
        }) {
            return Err(RepositoryError::duplicate_name(EntityKind::Hospital));
        }
        let id = state.hospitals.allocate();
        let created = Hospital::new(
            HospitalId::new(id),
            hospital.name.clone(),
            hospital.phone_number.clone(),
        );
        state.hospitals.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: HospitalId) -> Result<Option<Hospital>, RepositoryError> {
        Ok(self.lock()?.hospitals.rows.get(&id.get()).cloned())
    }

    async fn find_by_name(&self, name: &EntityName) -> Result<Option<Hospital>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .hospitals
            .rows
            .values()
            .find(|h| h.name() == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Hospital>, RepositoryError> {
        Ok(self.lock()?.hospitals.rows.values().cloned().collect())
    }

    async fn update(&self, hospital: &Hospital) -> Result<Option<Hospital>, RepositoryError> {
        let mut state = self.lock()?;
        if name_taken(
            state.hospitals.rows.values(),
            hospital.name(),
            Some(hospital.id()),
            |h| (h.id(), h.name()),
        ) {
            return Err(RepositoryError::duplicate_name(EntityKind::Hospital));
        }
        let Some(slot) = state.hospitals.rows.get_mut(&hospital.id().get()) else {
            return Ok(None);
        };
        *slot = hospital.clone();
        Ok(Some(hospital.clone()))
    }

    async fn delete(&self, id: HospitalId) -> Result<bool, RepositoryError> {
        let mut state = self.lock()?;
        if state.hospitals.rows.remove(&id.get()).is_none() {
            return Ok(false);
        }
        state.cascade(|patient| patient.hospital_id() == id);
        Ok(true)
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryRegistry {
    async fn create(&self, department: &NewDepartment) -> Result<Department, RepositoryError> {
        let mut state = self.lock()?;
        if name_taken(state.departments.rows.values(), &department.name, None, |d| {
            (d.id(), d.name())
        }) {
            return Err(RepositoryError::duplicate_name(EntityKind::Department));
        }
        let id = state.departments.allocate();
        let created = Department::new(DepartmentId::new(id), department.name.clone());
        state.departments.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: DepartmentId) -> Result<Option<Department>, RepositoryError> {
        Ok(self.lock()?.departments.rows.get(&id.get()).cloned())
    }

    async fn find_by_name(
        &self,
        name: &EntityName,
    ) -> Result<Option<Department>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .departments
            .rows
            .values()
            .find(|d| d.name() == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(self.lock()?.departments.rows.values().cloned().collect())
    }

    async fn update(
        &self,
        department: &Department,
    ) -> Result<Option<Department>, RepositoryError> {
        let mut state = self.lock()?;
        if name_taken(
            state.departments.rows.values(),
            department.name(),
            Some(department.id()),
            |d| (d.id(), d.name()),
        ) {
            return Err(RepositoryError::duplicate_name(EntityKind::Department));
        }
        let Some(slot) = state.departments.rows.get_mut(&department.id().get()) else {
            return Ok(None);
        };
        *slot = department.clone();
        Ok(Some(department.clone()))
    }

    async fn delete(&self, id: DepartmentId) -> Result<bool, RepositoryError> {
        let mut state = self.lock()?;
        if state.departments.rows.remove(&id.get()).is_none() {
            return Ok(false);
        }
        state.cascade(|patient| patient.department_id() == id);
        Ok(true)
    }
}

#[async_trait]
impl PatientRepository for InMemoryRegistry {
    async fn create(&self, patient: &NewPatient) -> Result<PatientRecord, RepositoryError> {
        let mut state = self.lock()?;
        state.check_patient_refs(patient.user_id, patient.hospital_id, patient.department_id)?;
        if name_taken(state.patients.rows.values(), &patient.name, None, |p| {
            (p.id(), p.name())
        }) {
            return Err(RepositoryError::duplicate_name(EntityKind::Patient));
        }
        let id = state.patients.allocate();
        let created = Patient::new(PatientId::new(id), patient.clone());
        let record = state.record(&created)?;
        state.patients.rows.insert(id, created);
        Ok(record)
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<PatientRecord>, RepositoryError> {
        let state = self.lock()?;
        state
            .patients
            .rows
            .get(&id.get())
            .map(|patient| state.record(patient))
            .transpose()
    }

    async fn find_by_name(&self, name: &EntityName) -> Result<Option<Patient>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .patients
            .rows
            .values()
            .find(|p| p.name() == name)
            .cloned())
    }

    async fn list_for_user(&self, owner: UserId) -> Result<Vec<PatientRecord>, RepositoryError> {
        self.lock()?.records(|p| p.user_id() == owner)
    }

    async fn list_for_hospital(
        &self,
        hospital: HospitalId,
        owner: UserId,
    ) -> Result<Vec<PatientRecord>, RepositoryError> {
        self.lock()?
            .records(|p| p.hospital_id() == hospital && p.user_id() == owner)
    }

    async fn list_for_department(
        &self,
        department: DepartmentId,
        owner: UserId,
    ) -> Result<Vec<PatientRecord>, RepositoryError> {
        self.lock()?
            .records(|p| p.department_id() == department && p.user_id() == owner)
    }

    async fn update(&self, patient: &Patient) -> Result<Option<PatientRecord>, RepositoryError> {
        let mut state = self.lock()?;
        if !state.patients.rows.contains_key(&patient.id().get()) {
            return Ok(None);
        }
        state.check_patient_refs(
            patient.user_id(),
            patient.hospital_id(),
            patient.department_id(),
        )?;
        if name_taken(
            state.patients.rows.values(),
            patient.name(),
            Some(patient.id()),
            |p| (p.id(), p.name()),
        ) {
            return Err(RepositoryError::duplicate_name(EntityKind::Patient));
        }
        let record = state.record(patient)?;
        state.patients.rows.insert(patient.id().get(), patient.clone());
        Ok(Some(record))
    }

    async fn delete(&self, id: PatientId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.patients.rows.remove(&id.get()).is_some())
    }
}
