//! PostgreSQL-backed `DepartmentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DepartmentRepository, RepositoryError};
use crate::domain::{Department, DepartmentId, EntityKind, EntityName, NewDepartment};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DepartmentFields, DepartmentRow};
use super::pool::DbPool;
use super::schema::departments;

fn map_error(error: diesel::result::Error) -> RepositoryError {
    map_diesel_error(error, EntityKind::Department)
}

/// Diesel implementation of the `DepartmentRepository` port.
#[derive(Clone)]
pub struct DieselDepartmentRepository {
    pool: DbPool,
}

impl DieselDepartmentRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for DieselDepartmentRepository {
    async fn create(&self, department: &NewDepartment) -> Result<Department, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(departments::table)
            .values(&DepartmentFields {
                name: department.name.as_ref(),
            })
            .returning(DepartmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_error)?
            .into_domain()
    }

    async fn find_by_id(&self, id: DepartmentId) -> Result<Option<Department>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        departments::table
            .find(id.get())
            .select(DepartmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(DepartmentRow::into_domain)
            .transpose()
    }

    async fn find_by_name(
        &self,
        name: &EntityName,
    ) -> Result<Option<Department>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        departments::table
            .filter(departments::name.eq(name.as_ref()))
            .select(DepartmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(DepartmentRow::into_domain)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Department>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        departments::table
            .order(departments::id.asc())
            .select(DepartmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?
            .into_iter()
            .map(DepartmentRow::into_domain)
            .collect()
    }

    async fn update(
        &self,
        department: &Department,
    ) -> Result<Option<Department>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(departments::table.find(department.id().get()))
            .set(&DepartmentFields {
                name: department.name().as_ref(),
            })
            .returning(DepartmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(DepartmentRow::into_domain)
            .transpose()
    }

    async fn delete(&self, id: DepartmentId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(departments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(removed > 0)
    }
}
