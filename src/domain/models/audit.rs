use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AuditLog {
    pub id: String,
    pub action: String,
    pub entity: String,
    pub entity_id: String,
    pub data: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn new(action: &str, entity: &str, entity_id: &str, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            entity: entity.to_string(),
            entity_id: entity_id.to_string(),
            data: Some(data.to_string()),
            created_at: Utc::now(),
        }
    }
}
