//! PostgreSQL-backed `PatientRepository`.
//!
//! Reads join `hospitals` and `departments` so each record carries the
//! referenced names. Writes insert or update the patient row and re-read the
//! joined record inside one transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PatientRepository, RepositoryError};
use crate::domain::{
    DepartmentId, EntityKind, EntityName, HospitalId, NewPatient, Patient, PatientId,
    PatientRecord, UserId,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    DepartmentRow, HospitalRow, PatientFields, PatientJoinRow, PatientRow, into_record,
};
use super::pool::DbPool;
use super::schema::{departments, hospitals, patients};

/// Patients joined with their hospital and department, ordered by id.
macro_rules! joined_patients {
    () => {
        patients::table
            .inner_join(hospitals::table)
            .inner_join(departments::table)
            .order(patients::id.asc())
            .select((
                PatientRow::as_select(),
                HospitalRow::as_select(),
                DepartmentRow::as_select(),
            ))
    };
}

fn map_error(error: diesel::result::Error) -> RepositoryError {
    map_diesel_error(error, EntityKind::Patient)
}

fn into_records(rows: Vec<PatientJoinRow>) -> Result<Vec<PatientRecord>, RepositoryError> {
    rows.into_iter().map(into_record).collect()
}

async fn load_record(
    conn: &mut AsyncPgConnection,
    id: i32,
) -> Result<Option<PatientJoinRow>, diesel::result::Error> {
    joined_patients!()
        .filter(patients::id.eq(id))
        .first::<PatientJoinRow>(conn)
        .await
        .optional()
}

/// Diesel implementation of the `PatientRepository` port.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn create(&self, patient: &NewPatient) -> Result<PatientRecord, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let fields = PatientFields::from_new(patient);
        let row = conn
            .transaction(|conn| {
                async move {
                    let id: i32 = diesel::insert_into(patients::table)
                        .values(&fields)
                        .returning(patients::id)
                        .get_result(conn)
                        .await?;
                    joined_patients!()
                        .filter(patients::id.eq(id))
                        .first::<PatientJoinRow>(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_error)?;
        into_record(row)
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<PatientRecord>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_record(&mut conn, id.get())
            .await
            .map_err(map_error)?
            .map(into_record)
            .transpose()
    }

    async fn find_by_name(&self, name: &EntityName) -> Result<Option<Patient>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        patients::table
            .filter(patients::name.eq(name.as_ref()))
            .select(PatientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(PatientRow::into_domain)
            .transpose()
    }

    async fn list_for_user(&self, owner: UserId) -> Result<Vec<PatientRecord>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = joined_patients!()
            .filter(patients::user_id.eq(owner.get()))
            .load::<PatientJoinRow>(&mut conn)
            .await
            .map_err(map_error)?;
        into_records(rows)
    }

    async fn list_for_hospital(
        &self,
        hospital: HospitalId,
        owner: UserId,
    ) -> Result<Vec<PatientRecord>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = joined_patients!()
            .filter(patients::hospital_id.eq(hospital.get()))
            .filter(patients::user_id.eq(owner.get()))
            .load::<PatientJoinRow>(&mut conn)
            .await
            .map_err(map_error)?;
        into_records(rows)
    }

    async fn list_for_department(
        &self,
        department: DepartmentId,
        owner: UserId,
    ) -> Result<Vec<PatientRecord>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = joined_patients!()
            .filter(patients::department_id.eq(department.get()))
            .filter(patients::user_id.eq(owner.get()))
            .load::<PatientJoinRow>(&mut conn)
            .await
            .map_err(map_error)?;
        into_records(rows)
    }

    async fn update(&self, patient: &Patient) -> Result<Option<PatientRecord>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = patient.id().get();
        let fields = PatientFields::from_patient(patient);
        let row = conn
            .transaction(|conn| {
                async move {
                    let changed = diesel::update(patients::table.find(id))
                        .set(&fields)
                        .execute(conn)
                        .await?;
                    if changed == 0 {
                        return Ok(None);
                    }
                    load_record(conn, id).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_error)?;
        row.map(into_record).transpose()
    }

    async fn delete(&self, id: PatientId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(patients::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(removed > 0)
    }
}
