use crate::domain::{models::block::AvailabilityBlock, ports::AvailabilityBlockRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresBlockRepo {
    pool: PgPool,
}

impl PostgresBlockRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityBlockRepository for PostgresBlockRepo {
    async fn create(&self, block: &AvailabilityBlock) -> Result<AvailabilityBlock, AppError> {
        sqlx::query_as::<_, AvailabilityBlock>(
            "INSERT INTO availability_blocks (id, facility_unit_id, start_date, end_date, reason, created_at)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        )
            .bind(&block.id).bind(&block.facility_unit_id).bind(block.start_date)
            .bind(block.end_date).bind(&block.reason).bind(block.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<AvailabilityBlock>, AppError> {
        sqlx::query_as::<_, AvailabilityBlock>("SELECT * FROM availability_blocks ORDER BY start_date DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_overlapping(&self, unit_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<AvailabilityBlock>, AppError> {
        // Inclusive on both ends: a block touching the checkout day counts.
        sqlx::query_as::<_, AvailabilityBlock>(
            "SELECT * FROM availability_blocks WHERE facility_unit_id = $1 AND start_date <= $2 AND end_date >= $3"
        )
            .bind(unit_id).bind(end).bind(start)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM availability_blocks WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Availability block not found".into()));
        }
        Ok(())
    }
}
