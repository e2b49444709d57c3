use crate::domain::{models::inventory::InventoryDay, ports::InventoryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresInventoryRepo {
    pool: PgPool,
}

impl PostgresInventoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepo {
    async fn upsert_day(&self, day: &InventoryDay) -> Result<InventoryDay, AppError> {
        sqlx::query_as::<_, InventoryDay>(
            "INSERT INTO inventory_days (facility_unit_id, day, allotment, remaining)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (facility_unit_id, day)
             DO UPDATE SET allotment = excluded.allotment, remaining = excluded.remaining
             RETURNING *"
        )
            .bind(&day.facility_unit_id).bind(day.day).bind(day.allotment).bind(day.remaining)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_days(&self, unit_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<InventoryDay>, AppError> {
        sqlx::query_as::<_, InventoryDay>(
            "SELECT * FROM inventory_days WHERE facility_unit_id = $1 AND day >= $2 AND day < $3 ORDER BY day ASC"
        )
            .bind(unit_id).bind(start).bind(end)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_exhausted(&self, unit_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<InventoryDay>, AppError> {
        sqlx::query_as::<_, InventoryDay>(
            "SELECT * FROM inventory_days WHERE facility_unit_id = $1 AND day >= $2 AND day < $3 AND remaining <= 0 ORDER BY day ASC"
        )
            .bind(unit_id).bind(start).bind(end)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
