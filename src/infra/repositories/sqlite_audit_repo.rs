use crate::domain::{models::audit::AuditLog, ports::AuditLogRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAuditRepo {
    pool: SqlitePool,
}

impl SqliteAuditRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for SqliteAuditRepo {
    async fn record(&self, entry: &AuditLog) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO audit_logs (id, action, entity, entity_id, data, created_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
            .bind(&entry.id).bind(&entry.action).bind(&entry.entity)
            .bind(&entry.entity_id).bind(&entry.data).bind(entry.created_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
    async fn list(&self, entity: Option<&str>) -> Result<Vec<AuditLog>, AppError> {
        match entity {
            Some(entity) => sqlx::query_as::<_, AuditLog>(
                "SELECT * FROM audit_logs WHERE entity = ? ORDER BY created_at DESC"
            )
                .bind(entity).fetch_all(&self.pool).await.map_err(AppError::Database),
            None => sqlx::query_as::<_, AuditLog>("SELECT * FROM audit_logs ORDER BY created_at DESC")
                .fetch_all(&self.pool).await.map_err(AppError::Database),
        }
    }
}
