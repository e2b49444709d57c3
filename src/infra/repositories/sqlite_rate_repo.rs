use crate::domain::{models::rate::RateRule, ports::RateRuleRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteRateRepo {
    pool: SqlitePool,
}

impl SqliteRateRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateRuleRepository for SqliteRateRepo {
    async fn create(&self, rule: &RateRule) -> Result<RateRule, AppError> {
        sqlx::query_as::<_, RateRule>(
            "INSERT INTO rate_rules (id, facility_unit_id, facility_category_id, price_type, base_price, currency, effective_from, effective_to, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&rule.id).bind(&rule.facility_unit_id).bind(&rule.facility_category_id)
            .bind(&rule.price_type).bind(rule.base_price).bind(&rule.currency)
            .bind(rule.effective_from).bind(rule.effective_to).bind(rule.is_active).bind(rule.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<RateRule>, AppError> {
        sqlx::query_as::<_, RateRule>("SELECT * FROM rate_rules ORDER BY effective_from DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_for_unit(&self, unit_id: &str, on: NaiveDate) -> Result<Option<RateRule>, AppError> {
        sqlx::query_as::<_, RateRule>(
            "SELECT * FROM rate_rules
             WHERE facility_unit_id = ? AND is_active = 1
               AND effective_from <= ? AND (effective_to IS NULL OR effective_to >= ?)
             ORDER BY effective_from DESC LIMIT 1"
        )
            .bind(unit_id).bind(on).bind(on)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_for_category(&self, category_id: &str, on: NaiveDate) -> Result<Option<RateRule>, AppError> {
        sqlx::query_as::<_, RateRule>(
            "SELECT * FROM rate_rules
             WHERE facility_category_id = ? AND facility_unit_id IS NULL AND is_active = 1
               AND effective_from <= ? AND (effective_to IS NULL OR effective_to >= ?)
             ORDER BY effective_from DESC LIMIT 1"
        )
            .bind(category_id).bind(on).bind(on)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
