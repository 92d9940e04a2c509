//! PostgreSQL-backed `HospitalRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HospitalRepository, RepositoryError};
use crate::domain::{EntityKind, EntityName, Hospital, HospitalId, NewHospital};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{HospitalFields, HospitalRow};
use super::pool::DbPool;
use super::schema::hospitals;

fn map_error(error: diesel::result::Error) -> RepositoryError {
    map_diesel_error(error, EntityKind::Hospital)
}

/// Diesel implementation of the `HospitalRepository` port.
#[derive(Clone)]
pub struct DieselHospitalRepository {
    pool: DbPool,
}

impl DieselHospitalRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HospitalRepository for DieselHospitalRepository {
    async fn create(&self, hospital: &NewHospital) -> Result<Hospital, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let fields = HospitalFields {
            name: hospital.name.as_ref(),
            phone_number: hospital.phone_number.as_ref(),
        };
        diesel::insert_into(hospitals::table)
            .values(&fields)
            .returning(HospitalRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_error)?
            .into_domain()
    }

    async fn find_by_id(&self, id: HospitalId) -> Result<Option<Hospital>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        hospitals::table
            .find(id.get())
            .select(HospitalRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(HospitalRow::into_domain)
            .transpose()
    }

    async fn find_by_name(&self, name: &EntityName) -> Result<Option<Hospital>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        hospitals::table
            .filter(hospitals::name.eq(name.as_ref()))
            .select(HospitalRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(HospitalRow::into_domain)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Hospital>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        hospitals::table
            .order(hospitals::id.asc())
            .select(HospitalRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?
            .into_iter()
            .map(HospitalRow::into_domain)
            .collect()
    }

    async fn update(&self, hospital: &Hospital) -> Result<Option<Hospital>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let fields = HospitalFields {
            name: hospital.name().as_ref(),
            phone_number: hospital.phone_number().as_ref(),
        };
        diesel::update(hospitals::table.find(hospital.id().get()))
            .set(&fields)
            .returning(HospitalRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(HospitalRow::into_domain)
            .transpose()
    }

    async fn delete(&self, id: HospitalId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(hospitals::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(removed > 0)
    }
}
