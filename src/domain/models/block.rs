use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// An explicit blackout window (maintenance, private event) for one
/// facility unit. Both dates are inclusive.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AvailabilityBlock {
    pub id: String,
    pub facility_unit_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl AvailabilityBlock {
    pub fn new(facility_unit_id: String, start_date: NaiveDate, end_date: NaiveDate, reason: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            facility_unit_id,
            start_date,
            end_date,
            reason,
            created_at: Utc::now(),
        }
    }
}
