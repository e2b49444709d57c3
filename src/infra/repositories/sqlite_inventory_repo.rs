use crate::domain::{models::inventory::InventoryDay, ports::InventoryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteInventoryRepo {
    pool: SqlitePool,
}

impl SqliteInventoryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for SqliteInventoryRepo {
    async fn upsert_day(&self, day: &InventoryDay) -> Result<InventoryDay, AppError> {
        sqlx::query_as::<_, InventoryDay>(
            "INSERT INTO inventory_days (facility_unit_id, day, allotment, remaining)
             VALUES (?, ?, ?, ?)
             ON CONFLICT (facility_unit_id, day)
             DO UPDATE SET allotment = excluded.allotment, remaining = excluded.remaining
             RETURNING *"
        )
            .bind(&day.facility_unit_id).bind(day.day).bind(day.allotment).bind(day.remaining)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_days(&self, unit_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<InventoryDay>, AppError> {
        sqlx::query_as::<_, InventoryDay>(
            "SELECT * FROM inventory_days WHERE facility_unit_id = ? AND day >= ? AND day < ? ORDER BY day ASC"
        )
            .bind(unit_id).bind(start).bind(end)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_exhausted(&self, unit_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<InventoryDay>, AppError> {
        sqlx::query_as::<_, InventoryDay>(
            "SELECT * FROM inventory_days WHERE facility_unit_id = ? AND day >= ? AND day < ? AND remaining <= 0 ORDER BY day ASC"
        )
            .bind(unit_id).bind(start).bind(end)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
