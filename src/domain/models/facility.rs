use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A class of bookable facilities (Room, Cottage, Hall), used for
/// type-level fallback pricing.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct FacilityCategory {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FacilityCategory {
    pub fn new(kind: String, name: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            name,
            description,
            created_at: Utc::now(),
        }
    }
}

/// A single bookable physical entity: a specific room, cottage or hall.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct FacilityUnit {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewFacilityUnit {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
}

impl FacilityUnit {
    pub fn new(params: NewFacilityUnit) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category_id: params.category_id,
            name: params.name,
            description: params.description,
            capacity: params.capacity,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
