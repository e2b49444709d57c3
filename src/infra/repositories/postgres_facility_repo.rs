use crate::domain::{models::facility::{FacilityCategory, FacilityUnit}, ports::FacilityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresFacilityRepo {
    pool: PgPool,
}

impl PostgresFacilityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FacilityRepository for PostgresFacilityRepo {
    async fn create_category(&self, category: &FacilityCategory) -> Result<FacilityCategory, AppError> {
        sqlx::query_as::<_, FacilityCategory>(
            "INSERT INTO facility_categories (id, kind, name, description, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *"
        )
            .bind(&category.id).bind(&category.kind).bind(&category.name)
            .bind(&category.description).bind(category.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_categories(&self) -> Result<Vec<FacilityCategory>, AppError> {
        sqlx::query_as::<_, FacilityCategory>("SELECT * FROM facility_categories ORDER BY name ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_category(&self, id: &str) -> Result<Option<FacilityCategory>, AppError> {
        sqlx::query_as::<_, FacilityCategory>("SELECT * FROM facility_categories WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn create_unit(&self, unit: &FacilityUnit) -> Result<FacilityUnit, AppError> {
        sqlx::query_as::<_, FacilityUnit>(
            "INSERT INTO facility_units (id, category_id, name, description, capacity, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *"
        )
            .bind(&unit.id).bind(&unit.category_id).bind(&unit.name).bind(&unit.description)
            .bind(unit.capacity).bind(unit.is_active).bind(unit.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_unit(&self, id: &str) -> Result<Option<FacilityUnit>, AppError> {
        sqlx::query_as::<_, FacilityUnit>("SELECT * FROM facility_units WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_units(&self, active_only: bool) -> Result<Vec<FacilityUnit>, AppError> {
        if active_only {
            sqlx::query_as::<_, FacilityUnit>("SELECT * FROM facility_units WHERE is_active = TRUE ORDER BY name ASC")
                .fetch_all(&self.pool).await.map_err(AppError::Database)
        } else {
            sqlx::query_as::<_, FacilityUnit>("SELECT * FROM facility_units ORDER BY name ASC")
                .fetch_all(&self.pool).await.map_err(AppError::Database)
        }
    }
}
